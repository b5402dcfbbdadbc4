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


//! Model-backed services the pipeline depends on. Implementations live outside
//! this crate; each one is constructed once and shared behind an `Arc`.

use crate::error::AffectResult;
use crate::signal::ClassifierOutput;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub grayscale: bool,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            grayscale: false,
        }
    }

    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }
}

/// Portuguese to English.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, max_length: usize) -> AffectResult<String>;
}

#[async_trait]
pub trait TextEmotionClassifier: Send + Sync {
    /// Top emotion for already translated English text.
    async fn classify(&self, english_text: &str) -> AffectResult<ClassifierOutput>;
}

#[async_trait]
pub trait FacialEmotionClassifier: Send + Sync {
    /// Top facial emotion. Implementations honour `image.grayscale` by
    /// converting to grayscale before inference.
    async fn classify(&self, image: &ImageInput) -> AffectResult<ClassifierOutput>;
}
