// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


//! Curated mapping from classifier labels to a Portuguese display name and a
//! polarity category.
//!
//! The standard table is built once on first use and shared read-only by every
//! analysis. Lookups are case-insensitive and total: a label outside the table
//! falls back to its capitalised form with [`Category::Unknown`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl Category {
    pub fn localized(self) -> &'static str {
        match self {
            Category::Positive => "positiva",
            Category::Negative => "negativa",
            Category::Neutral => "neutra",
            Category::Unknown => "indefinida",
        }
    }

    /// `Unknown` never matches anything, itself included.
    pub fn matches(self, other: Category) -> bool {
        self == other && self != Category::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.localized())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionInfo {
    pub localized_name: String,
    pub category: Category,
}

const STANDARD_ENTRIES: &[(&str, &str, Category)] = &[
    // Positive
    ("joy", "Alegria", Category::Positive),
    ("happy", "Felicidade", Category::Positive),
    ("happiness", "Felicidade", Category::Positive),
    ("love", "Amor", Category::Positive),
    ("admiration", "Admiração", Category::Positive),
    ("amusement", "Diversão", Category::Positive),
    ("gratitude", "Gratidão", Category::Positive),
    ("excitement", "Empolgação", Category::Positive),
    ("optimism", "Otimismo", Category::Positive),
    ("approval", "Aprovação", Category::Positive),
    ("caring", "Carinho", Category::Positive),
    ("desire", "Desejo", Category::Positive),
    ("nervousness", "Nervosismo", Category::Positive),
    ("pride", "Orgulho", Category::Positive),
    ("realization", "Percepção", Category::Positive),
    ("relief", "Alívio", Category::Positive),
    // Negative
    ("sad", "Tristeza", Category::Negative),
    ("sadness", "Tristeza", Category::Negative),
    ("anger", "Raiva", Category::Negative),
    ("angry", "Raiva", Category::Negative),
    ("fear", "Medo", Category::Negative),
    ("disgust", "Nojo", Category::Negative),
    ("disappointment", "Decepção", Category::Negative),
    ("annoyance", "Irritação", Category::Negative),
    ("grief", "Luto", Category::Negative),
    ("disapproval", "Desaprovação", Category::Negative),
    ("embarrassment", "Vergonha", Category::Negative),
    ("remorse", "Remorso", Category::Negative),
    // Neutral
    ("neutral", "Neutra", Category::Neutral),
    ("surprise", "Surpresa", Category::Neutral),
    ("curiosity", "Curiosidade", Category::Neutral),
    ("confusion", "Confusão", Category::Neutral),
];

static STANDARD: Lazy<Taxonomy> = Lazy::new(|| {
    Taxonomy::from_entries(
        STANDARD_ENTRIES
            .iter()
            .map(|(label, name, category)| (*label, *name, *category)),
    )
});

#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    entries: BTreeMap<String, EmotionInfo>,
}

impl Taxonomy {
    /// The process-wide curated table.
    pub fn standard() -> &'static Taxonomy {
        &STANDARD
    }

    /// Builds a table keyed by lowercase label. When a label appears more than
    /// once the last definition wins.
    pub fn from_entries<I, K, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, N, Category)>,
        K: AsRef<str>,
        N: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(label, name, category)| {
                (
                    label.as_ref().to_lowercase(),
                    EmotionInfo {
                        localized_name: name.into(),
                        category,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, raw_label: &str) -> Option<&EmotionInfo> {
        self.entries.get(&raw_label.to_lowercase())
    }

    pub fn lookup(&self, raw_label: &str) -> EmotionInfo {
        self.get(raw_label).cloned().unwrap_or_else(|| EmotionInfo {
            localized_name: capitalize(raw_label),
            category: Category::Unknown,
        })
    }

    /// Labels in alphabetical order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &EmotionInfo)> {
        self.entries.iter().map(|(label, info)| (label.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Looks `raw_label` up in the standard table.
pub fn lookup(raw_label: &str) -> EmotionInfo {
    Taxonomy::standard().lookup(raw_label)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
