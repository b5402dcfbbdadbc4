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


//! Optional free-text elaboration of a signal pair, produced by an external
//! text-generation service.
//!
//! The augmenter absorbs every failure of the generator and reports it as an
//! absent narrative. It makes at most one call per analysis.

use crate::signal::EmotionSignal;
use async_trait::async_trait;
use llm_contracts::{GenerationConfig, LLMResult, Message, ProviderRequest, ProviderSettings};
use llm_providers::{client_from_settings, ApiClient};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const NARRATIVE_INSTRUCTION: &str = "Dada uma emoção facial e uma emoção falada/escrita, \
     cada uma com sua confiança, explique em um parágrafo uma razão plausível para essa \
     combinação. Responda em português.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    pub text_emotion: String,
    pub text_confidence: f64,
    pub image_emotion: String,
    pub image_confidence: f64,
    pub original_text: String,
    pub instruction: &'static str,
}

impl NarrativeRequest {
    pub fn new(text: &EmotionSignal, image: &EmotionSignal, original_text: &str) -> Self {
        Self {
            text_emotion: text.localized_name().to_string(),
            text_confidence: text.confidence(),
            image_emotion: image.localized_name().to_string(),
            image_confidence: image.confidence(),
            original_text: original_text.to_string(),
            instruction: NARRATIVE_INSTRUCTION,
        }
    }

    pub fn to_prompt(&self) -> String {
        format!(
            "Emoção no texto: {} ({:.0}%)\n\
             Emoção na expressão facial: {} ({:.0}%)\n\
             Texto original: \"{}\"",
            self.text_emotion,
            self.text_confidence,
            self.image_emotion,
            self.image_confidence,
            self.original_text
        )
    }
}

/// Capability that turns a [`NarrativeRequest`] into prose.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> LLMResult<String>;
}

pub struct LlmNarrativeGenerator {
    client: Arc<dyn ApiClient>,
    model: String,
    generation: GenerationConfig,
}

impl LlmNarrativeGenerator {
    pub fn new(client: Arc<dyn ApiClient>, model: impl Into<String>, generation: GenerationConfig) -> Self {
        Self {
            client,
            model: model.into(),
            generation,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> LLMResult<Self> {
        let client = client_from_settings(settings)?;
        Ok(Self::new(client, settings.model.clone(), settings.generation_config()))
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    pub async fn health_check(&self) -> LLMResult<()> {
        self.client.health_check(&self.model).await
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrativeGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> LLMResult<String> {
        let provider_request = ProviderRequest::new(
            self.model.clone(),
            vec![
                Message::system(request.instruction),
                Message::user(request.to_prompt()),
            ],
            &self.generation,
        );

        let response = self.client.send_request(provider_request).await?;
        debug!(
            provider = self.client.provider_name(),
            tokens = response.usage.total_tokens,
            "Narrative generated"
        );
        Ok(response.content)
    }
}

#[derive(Clone, Default)]
pub struct NarrativeAugmenter {
    generator: Option<Arc<dyn NarrativeGenerator>>,
}

impl NarrativeAugmenter {
    pub fn new(generator: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Missing credentials or a bad provider setup leave the augmenter
    /// disabled instead of failing.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        match LlmNarrativeGenerator::from_settings(settings) {
            Ok(generator) => {
                info!(
                    provider = generator.provider_name(),
                    model = %settings.model,
                    "Narrative augmenter enabled"
                );
                Self::new(Arc::new(generator))
            }
            Err(e) => {
                warn!("Narrative augmenter unavailable: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn augment(
        &self,
        text: Option<&EmotionSignal>,
        image: Option<&EmotionSignal>,
        original_text: &str,
    ) -> Option<String> {
        let (Some(text), Some(image)) = (text, image) else {
            debug!("Skipping narrative: both signals are required");
            return None;
        };
        let generator = self.generator.as_ref()?;

        let request = NarrativeRequest::new(text, image, original_text);
        match generator.generate(&request).await {
            Ok(content) if !content.trim().is_empty() => Some(content.trim().to_string()),
            Ok(_) => {
                warn!("Narrative service returned an empty response");
                None
            }
            Err(e) => {
                warn!("Narrative generation failed, continuing without it: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for NarrativeAugmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeAugmenter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::normalize;
    use llm_contracts::LLMError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        reply: fn() -> LLMResult<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NarrativeGenerator for Scripted {
        async fn generate(&self, _request: &NarrativeRequest) -> LLMResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn scripted(reply: fn() -> LLMResult<String>) -> Arc<Scripted> {
        Arc::new(Scripted {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_request_carries_localized_emotions_and_original_text() {
        let request = NarrativeRequest::new(
            &normalize("joy", 92.0),
            &normalize("sadness", 70.0),
            "Estou muito feliz hoje",
        );
        assert_eq!(request.text_emotion, "Alegria");
        assert_eq!(request.image_emotion, "Tristeza");
        let prompt = request.to_prompt();
        assert!(prompt.contains("Alegria (92%)"));
        assert!(prompt.contains("Tristeza (70%)"));
        assert!(prompt.contains("Estou muito feliz hoje"));
        assert!(request.instruction.contains("um parágrafo"));
    }

    #[tokio::test]
    async fn test_successful_narrative_is_trimmed() {
        let generator = scripted(|| Ok("  Uma explicação plausível.\n".to_string()));
        let augmenter = NarrativeAugmenter::new(generator.clone());
        let narrative = augmenter
            .augment(Some(&normalize("joy", 90.0)), Some(&normalize("joy", 80.0)), "oi")
            .await;
        assert_eq!(narrative.as_deref(), Some("Uma explicação plausível."));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_become_absent_without_retry() {
        let generator = scripted(|| Err(LLMError::Network("connection refused".to_string())));
        let augmenter = NarrativeAugmenter::new(generator.clone());
        let narrative = augmenter
            .augment(Some(&normalize("joy", 90.0)), Some(&normalize("fear", 80.0)), "oi")
            .await;
        assert!(narrative.is_none());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_response_is_absent() {
        let augmenter = NarrativeAugmenter::new(scripted(|| Ok("   ".to_string())));
        let narrative = augmenter
            .augment(Some(&normalize("joy", 90.0)), Some(&normalize("fear", 80.0)), "oi")
            .await;
        assert!(narrative.is_none());
    }

    #[tokio::test]
    async fn test_not_invoked_with_single_signal() {
        let generator = scripted(|| Ok("nunca".to_string()));
        let augmenter = NarrativeAugmenter::new(generator.clone());
        let narrative = augmenter.augment(None, Some(&normalize("fear", 55.0)), "").await;
        assert!(narrative.is_none());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_disable_augmenter() {
        let settings = ProviderSettings {
            provider: llm_contracts::Provider::Anthropic,
            api_key_env: Some("AFFECT_NARRATIVE_KEY_NEVER_SET".to_string()),
            ..Default::default()
        };
        let augmenter = NarrativeAugmenter::from_settings(&settings);
        assert!(!augmenter.is_enabled());
        let narrative = augmenter
            .augment(Some(&normalize("joy", 90.0)), Some(&normalize("joy", 80.0)), "oi")
            .await;
        assert!(narrative.is_none());
    }
}
