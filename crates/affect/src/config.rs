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
use llm_contracts::{Provider, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectConfig {
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub narrative: NarrativeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_translation_model")]
    pub translation_model: String,
    #[serde(default = "default_text_emotion_model")]
    pub text_emotion_model: String,
    #[serde(default = "default_facial_emotion_model")]
    pub facial_emotion_model: String,
    #[serde(default = "default_max_translation_length")]
    pub max_translation_length: usize,
    #[serde(default = "default_supported_image_types")]
    pub supported_image_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Upper bound the pipeline waits for a narrative before giving up on it.
    #[serde(default = "default_narrative_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_translation_model() -> String {
    "unicamp-dl/translation-pt-en-t5".to_string()
}
fn default_text_emotion_model() -> String {
    "SamLowe/roberta-base-go_emotions".to_string()
}
fn default_facial_emotion_model() -> String {
    "dima806/facial_emotions_image_detection".to_string()
}
fn default_max_translation_length() -> usize {
    400
}
fn default_supported_image_types() -> Vec<String> {
    ["png", "jpg", "jpeg", "webp"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
fn default_narrative_timeout() -> u64 {
    30
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            translation_model: default_translation_model(),
            text_emotion_model: default_text_emotion_model(),
            facial_emotion_model: default_facial_emotion_model(),
            max_translation_length: default_max_translation_length(),
            supported_image_types: default_supported_image_types(),
        }
    }
}

impl ModelSettings {
    pub fn supports_image_type(&self, extension: &str) -> bool {
        self.supported_image_types
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_seconds: default_narrative_timeout(),
            provider: ProviderSettings::default(),
        }
    }
}

impl NarrativeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AffectConfig {
    pub fn from_path(path: impl AsRef<Path>) -> AffectResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let config_str = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(yaml: &str) -> AffectResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// File settings (when a path is given) overlaid with `AFFECT_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> AffectResult<Self> {
        let config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> AffectResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(enabled) = lookup("AFFECT_NARRATIVE_ENABLED") {
            self.narrative.enabled = parse_bool(&enabled).ok_or_else(|| {
                AffectError::Config(format!("AFFECT_NARRATIVE_ENABLED must be a boolean, got '{enabled}'"))
            })?;
        }
        if let Some(provider) = lookup("AFFECT_NARRATIVE_PROVIDER") {
            self.narrative.provider.provider = Provider::try_from(provider.as_str())?;
        }
        if let Some(model) = lookup("AFFECT_NARRATIVE_MODEL") {
            self.narrative.provider.model = model;
        }
        if let Some(base_url) = lookup("AFFECT_NARRATIVE_BASE_URL") {
            self.narrative.provider.base_url = Some(base_url);
        }
        if let Some(timeout) = lookup("AFFECT_NARRATIVE_TIMEOUT_SECS") {
            self.narrative.timeout_seconds = timeout.parse().map_err(|_| {
                AffectError::Config(format!("AFFECT_NARRATIVE_TIMEOUT_SECS must be an integer, got '{timeout}'"))
            })?;
        }
        debug!(
            narrative_enabled = self.narrative.enabled,
            provider = %self.narrative.provider.provider,
            "Configuration resolved"
        );
        Ok(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
