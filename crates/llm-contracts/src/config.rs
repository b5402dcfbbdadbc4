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


use crate::requests::GenerationConfig;
use crate::types::Provider;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider")]
    pub provider: Provider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider() -> Provider {
    Provider::Ollama
}
fn default_model() -> String {
    "llama3.2".to_string()
}
fn default_timeout_seconds() -> u64 {
    30
}
fn default_max_tokens() -> u32 {
    400
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key_env: None,
            api_version: None,
            timeout_seconds: default_timeout_seconds(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderSettings {
    /// Name of the environment variable the API key is read from, if the
    /// provider needs one.
    pub fn api_key_variable(&self) -> Option<String> {
        self.api_key_env
            .clone()
            .or_else(|| self.provider.default_api_key_env().map(str::to_string))
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            top_p: None,
            stop_sequences: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: ProviderSettings =
            serde_yaml::from_str("provider: openai\nmodel: gpt-4o-mini\n").unwrap();
        assert_eq!(settings.provider, Provider::OpenAI);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(settings.api_key_variable().as_deref(), Some("OPENAI_API_KEY"));
    }

    #[test]
    fn test_explicit_api_key_env_wins() {
        let settings = ProviderSettings {
            provider: Provider::Anthropic,
            api_key_env: Some("MY_KEY".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.api_key_variable().as_deref(), Some("MY_KEY"));
        assert_eq!(settings.generation_config().max_tokens, Some(400));
    }
}
