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


//! Reconciles an emotion read from Portuguese text with one read from a facial
//! image.
//!
//! The pure core ([`taxonomy`], [`signal`], [`consistency`], [`interpretation`])
//! is synchronous and shares one frozen taxonomy. [`narrative`] adds an
//! optional, failure-tolerant elaboration from an external text-generation
//! service, and [`pipeline`] drives the model collaborators for a full request.

pub mod analysis;
pub mod collaborators;
pub mod config;
pub mod consistency;
pub mod error;
pub mod interpretation;
pub mod messages;
pub mod narrative;
pub mod pipeline;
pub mod signal;
pub mod taxonomy;

pub use analysis::{AnalysisReport, CombinedAnalysis, ImageAnalysis, NarrativeStatus, TextAnalysis};
pub use collaborators::{FacialEmotionClassifier, ImageInput, TextEmotionClassifier, Translator};
pub use config::{AffectConfig, ModelSettings, NarrativeSettings};
pub use consistency::{evaluate, ConsistencyVerdict};
pub use error::{AffectError, AffectResult};
pub use interpretation::{interpret, InterpretationKind};
pub use narrative::{LlmNarrativeGenerator, NarrativeAugmenter, NarrativeGenerator, NarrativeRequest};
pub use pipeline::{AnalysisRequest, EmotionPipeline};
pub use signal::{normalize, ClassifierOutput, EmotionSignal};
pub use taxonomy::{lookup, Category, EmotionInfo, Taxonomy};
