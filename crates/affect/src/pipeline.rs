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


use crate::analysis::{AnalysisReport, CombinedAnalysis, ImageAnalysis, TextAnalysis};
use crate::collaborators::{FacialEmotionClassifier, ImageInput, TextEmotionClassifier, Translator};
use crate::config::{AffectConfig, ModelSettings};
use crate::error::{AffectError, AffectResult};
use crate::narrative::NarrativeAugmenter;
use crate::signal::EmotionSignal;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub id: Uuid,
    pub text: Option<String>,
    pub image: Option<ImageInput>,
}

impl AnalysisRequest {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            text: None,
            image: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }

    /// Blank text counts as no text.
    pub fn text_input(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn has_text(&self) -> bool {
        self.text_input().is_some()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the collaborators for one request and reconciles their output.
pub struct EmotionPipeline {
    translator: Arc<dyn Translator>,
    text_classifier: Arc<dyn TextEmotionClassifier>,
    facial_classifier: Arc<dyn FacialEmotionClassifier>,
    augmenter: NarrativeAugmenter,
    narrative_enabled: bool,
    narrative_timeout: Duration,
    models: ModelSettings,
}

impl EmotionPipeline {
    pub fn new(
        translator: Arc<dyn Translator>,
        text_classifier: Arc<dyn TextEmotionClassifier>,
        facial_classifier: Arc<dyn FacialEmotionClassifier>,
    ) -> Self {
        Self {
            translator,
            text_classifier,
            facial_classifier,
            augmenter: NarrativeAugmenter::disabled(),
            narrative_enabled: false,
            narrative_timeout: Duration::from_secs(30),
            models: ModelSettings::default(),
        }
    }

    /// Requests a narrative for every complete analysis. An augmenter without
    /// a generator reports the narrative as unavailable.
    pub fn with_augmenter(mut self, augmenter: NarrativeAugmenter, timeout: Duration) -> Self {
        self.augmenter = augmenter;
        self.narrative_enabled = true;
        self.narrative_timeout = timeout;
        self
    }

    pub fn with_models(mut self, models: ModelSettings) -> Self {
        self.models = models;
        self
    }

    /// Applies model settings and, when enabled, builds the narrative
    /// augmenter from the configured provider.
    pub fn configured(mut self, config: &AffectConfig) -> Self {
        self.models = config.models.clone();
        if config.narrative.enabled {
            self.augmenter = NarrativeAugmenter::from_settings(&config.narrative.provider);
            self.narrative_enabled = true;
            self.narrative_timeout = config.narrative.timeout();
        }
        self
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    pub async fn analyse(&self, request: AnalysisRequest) -> AffectResult<AnalysisReport> {
        if !request.has_text() && !request.has_image() {
            return Err(AffectError::NoInput);
        }

        let text_task = async {
            match request.text_input() {
                Some(text) => self.analyse_text(text).await.map(Some),
                None => Ok(None),
            }
        };
        let image_task = async {
            match &request.image {
                Some(image) => self.analyse_image(image).await.map(Some),
                None => Ok(None),
            }
        };
        let (text, image) = tokio::try_join!(text_task, image_task)?;

        let text_signal = text.as_ref().map(|t| t.signal.clone());
        let image_signal = image.as_ref().map(|i| i.signal.clone());

        let narrative_requested =
            self.narrative_enabled && text_signal.is_some() && image_signal.is_some();
        let narrative = if narrative_requested {
            let original = text.as_ref().map_or("", |t| t.original.as_str());
            self.narrative_with_timeout(text_signal.as_ref(), image_signal.as_ref(), original)
                .await
        } else {
            None
        };
        let combined = CombinedAnalysis::new(text_signal, image_signal, narrative);

        info!(
            consistency = ?combined.consistency(),
            narrative = combined.narrative().is_some(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            id: request.id,
            analysed_at: Utc::now(),
            text,
            image,
            combined,
            narrative_requested,
        })
    }

    async fn analyse_text(&self, text: &str) -> AffectResult<TextAnalysis> {
        let translated = self
            .translator
            .translate(text, self.models.max_translation_length)
            .await?;
        debug!("Translated text: {}", translated);

        let signal = self.text_classifier.classify(&translated).await?.into_signal()?;
        debug!(label = signal.raw_label(), confidence = signal.confidence(), "Text classified");

        Ok(TextAnalysis {
            original: text.to_string(),
            translated,
            signal,
        })
    }

    async fn analyse_image(&self, image: &ImageInput) -> AffectResult<ImageAnalysis> {
        match image.extension() {
            Some(ext) if self.models.supports_image_type(&ext) => {}
            _ => return Err(AffectError::UnsupportedImageType(image.filename.clone())),
        }

        let signal = self.facial_classifier.classify(image).await?.into_signal()?;
        debug!(
            label = signal.raw_label(),
            confidence = signal.confidence(),
            grayscale = image.grayscale,
            "Image classified"
        );

        Ok(ImageAnalysis {
            filename: image.filename.clone(),
            grayscale: image.grayscale,
            signal,
        })
    }

    async fn narrative_with_timeout(
        &self,
        text: Option<&EmotionSignal>,
        image: Option<&EmotionSignal>,
        original: &str,
    ) -> Option<String> {
        let call = self.augmenter.augment(text, image, original);
        match tokio::time::timeout(self.narrative_timeout, call).await {
            Ok(narrative) => narrative,
            Err(_) => {
                warn!("Narrative timed out after {:?}", self.narrative_timeout);
                None
            }
        }
    }
}
