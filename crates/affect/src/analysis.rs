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


use crate::consistency::{evaluate, ConsistencyVerdict};
use crate::interpretation::interpret;
use crate::messages;
use crate::narrative::NarrativeAugmenter;
use crate::signal::EmotionSignal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Reconciled view of one request's text and image signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedAnalysis {
    text_signal: Option<EmotionSignal>,
    image_signal: Option<EmotionSignal>,
    consistency: ConsistencyVerdict,
    interpretation: String,
    narrative: Option<String>,
}

impl CombinedAnalysis {
    pub fn reconcile(text_signal: Option<EmotionSignal>, image_signal: Option<EmotionSignal>) -> Self {
        Self::new(text_signal, image_signal, None)
    }

    /// Builds the record with a narrative that was already produced for this
    /// pair of signals.
    pub fn new(
        text_signal: Option<EmotionSignal>,
        image_signal: Option<EmotionSignal>,
        narrative: Option<String>,
    ) -> Self {
        let consistency = evaluate(text_signal.as_ref(), image_signal.as_ref());
        let interpretation = interpret(text_signal.as_ref(), image_signal.as_ref());
        Self {
            text_signal,
            image_signal,
            consistency,
            interpretation,
            narrative,
        }
    }

    pub async fn reconcile_with_narrative(
        text_signal: Option<EmotionSignal>,
        image_signal: Option<EmotionSignal>,
        original_text: &str,
        augmenter: &NarrativeAugmenter,
    ) -> Self {
        let narrative = augmenter
            .augment(text_signal.as_ref(), image_signal.as_ref(), original_text)
            .await;
        Self::new(text_signal, image_signal, narrative)
    }

    pub fn text_signal(&self) -> Option<&EmotionSignal> {
        self.text_signal.as_ref()
    }

    pub fn image_signal(&self) -> Option<&EmotionSignal> {
        self.image_signal.as_ref()
    }

    pub fn consistency(&self) -> ConsistencyVerdict {
        self.consistency
    }

    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    pub fn narrative(&self) -> Option<&str> {
        self.narrative.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.text_signal.is_some() && self.image_signal.is_some()
    }

    /// `Texto: joy | Imagem: N/A`
    pub fn summary(&self) -> String {
        let label = |signal: Option<&EmotionSignal>| {
            signal.map_or_else(|| "N/A".to_string(), |s| s.raw_label().to_string())
        };
        format!(
            "Texto: {} | Imagem: {}",
            label(self.text_signal()),
            label(self.image_signal())
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub original: String,
    pub translated: String,
    pub signal: EmotionSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAnalysis {
    pub filename: String,
    pub grayscale: bool,
    pub signal: EmotionSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeStatus<'a> {
    Generated(&'a str),
    Unavailable,
    NotRequested,
}

impl NarrativeStatus<'_> {
    pub fn message(&self) -> &str {
        match self {
            NarrativeStatus::Generated(text) => *text,
            NarrativeStatus::Unavailable => messages::NARRATIVE_UNAVAILABLE,
            NarrativeStatus::NotRequested => messages::NARRATIVE_NOT_REQUESTED,
        }
    }
}

/// Everything produced for one user request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub analysed_at: DateTime<Utc>,
    pub text: Option<TextAnalysis>,
    pub image: Option<ImageAnalysis>,
    pub combined: CombinedAnalysis,
    pub narrative_requested: bool,
}

impl AnalysisReport {
    pub fn narrative_status(&self) -> NarrativeStatus<'_> {
        match (self.narrative_requested, self.combined.narrative()) {
            (_, Some(text)) => NarrativeStatus::Generated(text),
            (true, None) => NarrativeStatus::Unavailable,
            (false, None) => NarrativeStatus::NotRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::normalize;

    #[test]
    fn test_summary_marks_missing_modalities() {
        let analysis = CombinedAnalysis::reconcile(Some(normalize("joy", 92.0)), None);
        assert_eq!(analysis.summary(), "Texto: joy | Imagem: N/A");
        assert!(!analysis.is_complete());
        assert_eq!(analysis.consistency(), ConsistencyVerdict::NotApplicable);
    }

    #[test]
    fn test_narrative_status() {
        let combined = CombinedAnalysis::reconcile(Some(normalize("joy", 92.0)), Some(normalize("joy", 88.0)));
        let mut report = AnalysisReport {
            id: Uuid::new_v4(),
            analysed_at: Utc::now(),
            text: None,
            image: None,
            combined,
            narrative_requested: false,
        };
        assert_eq!(report.narrative_status(), NarrativeStatus::NotRequested);

        report.narrative_requested = true;
        assert_eq!(report.narrative_status(), NarrativeStatus::Unavailable);
        assert_eq!(report.narrative_status().message(), messages::NARRATIVE_UNAVAILABLE);

        report.combined = CombinedAnalysis::new(
            Some(normalize("joy", 92.0)),
            Some(normalize("joy", 88.0)),
            Some("Texto.".to_string()),
        );
        assert_eq!(report.narrative_status(), NarrativeStatus::Generated("Texto."));
        assert_eq!(report.combined.consistency(), ConsistencyVerdict::Consistent);
    }

    #[test]
    fn test_serializes_verdict_in_snake_case() {
        let analysis = CombinedAnalysis::reconcile(Some(normalize("sadness", 70.0)), Some(normalize("joy", 65.0)));
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["consistency"], "divergent");
        assert_eq!(json["text_signal"]["localized_name"], "Tristeza");
        assert!(json["narrative"].is_null());
    }
}
