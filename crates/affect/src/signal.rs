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


use crate::error::{AffectError, AffectResult};
use crate::taxonomy::{Category, Taxonomy};
use serde::{Deserialize, Serialize};

/// One modality's classification, with the taxonomy lookup attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSignal {
    raw_label: String,
    confidence: f64,
    localized_name: String,
    category: Category,
}

impl EmotionSignal {
    /// Normalizes against the standard taxonomy. Confidence is a percentage and
    /// is passed through untouched.
    pub fn normalize(raw_label: impl Into<String>, confidence: f64) -> Self {
        Self::with_taxonomy(Taxonomy::standard(), raw_label, confidence)
    }

    pub fn with_taxonomy(taxonomy: &Taxonomy, raw_label: impl Into<String>, confidence: f64) -> Self {
        let raw_label = raw_label.into();
        let info = taxonomy.lookup(&raw_label);
        Self {
            raw_label,
            confidence,
            localized_name: info.localized_name,
            category: info.category,
        }
    }

    pub fn raw_label(&self) -> &str {
        &self.raw_label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn localized_name(&self) -> &str {
        &self.localized_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn same_label(&self, other: &EmotionSignal) -> bool {
        self.raw_label.to_lowercase() == other.raw_label.to_lowercase()
    }

    pub fn same_category(&self, other: &EmotionSignal) -> bool {
        self.category.matches(other.category)
    }

    /// `JOY (92.00%)`
    pub fn display(&self) -> String {
        format!("{} ({:.2}%)", self.raw_label.to_uppercase(), self.confidence)
    }
}

/// Shorthand for [`EmotionSignal::normalize`].
pub fn normalize(raw_label: &str, confidence: f64) -> EmotionSignal {
    EmotionSignal::normalize(raw_label, confidence)
}

/// Top prediction as a classifier reports it, score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub label: String,
    pub score: f64,
}

impl ClassifierOutput {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Scales the score to a percentage. Out-of-range scores are rejected
    /// rather than clamped.
    pub fn into_signal(self) -> AffectResult<EmotionSignal> {
        if self.label.trim().is_empty() {
            return Err(AffectError::EmptyLabel);
        }
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(AffectError::InvalidScore {
                label: self.label,
                score: self.score,
            });
        }
        Ok(EmotionSignal::normalize(self.label, self.score * 100.0))
    }
}
