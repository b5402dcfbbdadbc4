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


use llm_contracts::LLMError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffectError {
    #[error("No text or image provided for analysis")]
    NoInput,

    #[error("Emotion label is empty")]
    EmptyLabel,

    #[error("Invalid score {score} for label '{label}': expected a value in [0, 1]")]
    InvalidScore { label: String, score: f64 },

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),
}

pub type AffectResult<T> = Result<T, AffectError>;
