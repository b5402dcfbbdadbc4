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


use affect::{
    AffectConfig, AffectError, AffectResult, AnalysisRequest, ClassifierOutput, ConsistencyVerdict,
    EmotionPipeline, FacialEmotionClassifier, ImageInput, NarrativeAugmenter, NarrativeGenerator,
    NarrativeRequest, NarrativeStatus, TextEmotionClassifier, Translator,
};
use async_trait::async_trait;
use llm_contracts::{LLMError, LLMResult, Provider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct DictionaryTranslator;

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(&self, text: &str, max_length: usize) -> AffectResult<String> {
        assert_eq!(max_length, 400);
        Ok(match text {
            "Estou muito feliz" => "I am very happy".to_string(),
            "Estou triste" => "I am sad".to_string(),
            other => other.to_string(),
        })
    }
}

struct KeywordClassifier;

#[async_trait]
impl TextEmotionClassifier for KeywordClassifier {
    async fn classify(&self, english_text: &str) -> AffectResult<ClassifierOutput> {
        if english_text.contains("happy") {
            Ok(ClassifierOutput::new("joy", 0.92))
        } else if english_text.contains("sad") {
            Ok(ClassifierOutput::new("sadness", 0.70))
        } else {
            Ok(ClassifierOutput::new("neutral", 0.51))
        }
    }
}

struct FixedFace {
    output: ClassifierOutput,
    calls: AtomicUsize,
}

#[async_trait]
impl FacialEmotionClassifier for FixedFace {
    async fn classify(&self, _image: &ImageInput) -> AffectResult<ClassifierOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

struct BrokenTranslator;

#[async_trait]
impl Translator for BrokenTranslator {
    async fn translate(&self, _text: &str, _max_length: usize) -> AffectResult<String> {
        Err(AffectError::Collaborator("translation model unavailable".to_string()))
    }
}

struct HangingGenerator;

#[async_trait]
impl NarrativeGenerator for HangingGenerator {
    async fn generate(&self, _request: &NarrativeRequest) -> LLMResult<String> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Err(LLMError::Timeout)
    }
}

struct QuoteGenerator;

#[async_trait]
impl NarrativeGenerator for QuoteGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> LLMResult<String> {
        Ok(format!("Sobre \"{}\": explicação.", request.original_text))
    }
}

fn face(label: &str, score: f64) -> Arc<FixedFace> {
    Arc::new(FixedFace {
        output: ClassifierOutput::new(label, score),
        calls: AtomicUsize::new(0),
    })
}

fn pipeline(face: Arc<FixedFace>) -> EmotionPipeline {
    EmotionPipeline::new(Arc::new(DictionaryTranslator), Arc::new(KeywordClassifier), face)
}

fn photo() -> ImageInput {
    ImageInput::new(vec![0xFF, 0xD8, 0xFF], "rosto.jpg")
}

#[tokio::test]
async fn no_input_is_rejected() {
    let result = pipeline(face("joy", 0.9)).analyse(AnalysisRequest::new()).await;
    assert!(matches!(result, Err(AffectError::NoInput)));
}

#[tokio::test]
async fn text_and_image_are_reconciled() {
    let report = pipeline(face("joy", 0.88))
        .analyse(AnalysisRequest::new().with_text("Estou muito feliz").with_image(photo()))
        .await
        .unwrap();

    let text = report.text.as_ref().unwrap();
    assert_eq!(text.translated, "I am very happy");
    assert!((text.signal.confidence() - 92.0).abs() < 1e-9);
    assert_eq!(report.image.as_ref().unwrap().filename, "rosto.jpg");
    assert_eq!(report.combined.consistency(), ConsistencyVerdict::Consistent);
    assert!(report.combined.interpretation().contains("Alegria"));
    assert_eq!(report.narrative_status(), NarrativeStatus::NotRequested);
}

#[tokio::test]
async fn text_only_request_is_incomplete_but_answered() {
    let faces = face("joy", 0.9);
    let report = pipeline(faces.clone())
        .analyse(AnalysisRequest::new().with_text("Estou triste"))
        .await
        .unwrap();

    assert!(report.image.is_none());
    assert_eq!(faces.calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.combined.consistency(), ConsistencyVerdict::NotApplicable);
    assert_eq!(report.combined.summary(), "Texto: sadness | Imagem: N/A");
}

#[tokio::test]
async fn out_of_range_score_fails_fast() {
    let result = pipeline(face("joy", 88.0))
        .analyse(AnalysisRequest::new().with_image(photo()))
        .await;
    assert!(matches!(result, Err(AffectError::InvalidScore { .. })));
}

#[tokio::test]
async fn unsupported_image_type_is_rejected() {
    let result = pipeline(face("joy", 0.5))
        .analyse(AnalysisRequest::new().with_image(ImageInput::new(vec![], "anim.gif")))
        .await;
    assert!(matches!(result, Err(AffectError::UnsupportedImageType(_))));
}

#[tokio::test]
async fn classifier_failure_propagates() {
    let pipeline = EmotionPipeline::new(
        Arc::new(BrokenTranslator),
        Arc::new(KeywordClassifier),
        face("joy", 0.5),
    );
    let result = pipeline
        .analyse(AnalysisRequest::new().with_text("Olá").with_image(photo()))
        .await;
    assert!(matches!(result, Err(AffectError::Collaborator(_))));
}

#[tokio::test]
async fn narrative_timeout_degrades_to_unavailable() {
    let pipeline = pipeline(face("joy", 0.65)).with_augmenter(
        NarrativeAugmenter::new(Arc::new(HangingGenerator)),
        Duration::from_millis(50),
    );
    let report = pipeline
        .analyse(AnalysisRequest::new().with_text("Estou triste").with_image(photo()))
        .await
        .unwrap();

    assert_eq!(report.combined.consistency(), ConsistencyVerdict::Divergent);
    assert!(report.combined.interpretation().contains("Tristeza"));
    assert_eq!(report.narrative_status(), NarrativeStatus::Unavailable);
}

#[tokio::test]
async fn narrative_receives_untranslated_text() {
    let pipeline = pipeline(face("fear", 0.6)).with_augmenter(
        NarrativeAugmenter::new(Arc::new(QuoteGenerator)),
        Duration::from_secs(1),
    );
    let report = pipeline
        .analyse(AnalysisRequest::new().with_text("Estou muito feliz").with_image(photo()))
        .await
        .unwrap();

    assert_eq!(
        report.narrative_status(),
        NarrativeStatus::Generated("Sobre \"Estou muito feliz\": explicação.")
    );
}

#[tokio::test]
async fn enabled_narrative_without_credentials_is_unavailable() {
    let mut config = AffectConfig::default();
    config.narrative.enabled = true;
    config.narrative.provider.provider = Provider::OpenAI;
    config.narrative.provider.api_key_env = Some("AFFECT_PIPELINE_KEY_NEVER_SET".to_string());

    let pipeline = pipeline(face("joy", 0.9)).configured(&config);
    let report = pipeline
        .analyse(AnalysisRequest::new().with_text("Estou muito feliz").with_image(photo()))
        .await
        .unwrap();

    assert!(report.narrative_requested);
    assert_eq!(report.narrative_status(), NarrativeStatus::Unavailable);
    assert_eq!(report.combined.consistency(), ConsistencyVerdict::Consistent);
}

#[tokio::test]
async fn narrative_left_off_in_config_is_not_requested() {
    let pipeline = pipeline(face("joy", 0.9)).configured(&AffectConfig::default());
    let report = pipeline
        .analyse(AnalysisRequest::new().with_text("Estou muito feliz").with_image(photo()))
        .await
        .unwrap();

    assert_eq!(report.narrative_status(), NarrativeStatus::NotRequested);
}

#[tokio::test]
async fn single_modality_never_requests_narrative() {
    let pipeline = pipeline(face("joy", 0.9)).with_augmenter(
        NarrativeAugmenter::new(Arc::new(QuoteGenerator)),
        Duration::from_secs(1),
    );
    let report = pipeline
        .analyse(AnalysisRequest::new().with_image(photo()))
        .await
        .unwrap();

    assert!(!report.narrative_requested);
    assert_eq!(report.narrative_status(), NarrativeStatus::NotRequested);
}
