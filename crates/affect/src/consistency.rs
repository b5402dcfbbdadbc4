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


use crate::signal::EmotionSignal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyVerdict {
    NotApplicable,
    Consistent,
    Similar,
    Divergent,
}

impl ConsistencyVerdict {
    pub fn label(self) -> &'static str {
        match self {
            ConsistencyVerdict::NotApplicable => "N/A",
            ConsistencyVerdict::Consistent => "✅ Consistente",
            ConsistencyVerdict::Similar => "✅ Similar",
            ConsistencyVerdict::Divergent => "❌ Divergente",
        }
    }
}

impl fmt::Display for ConsistencyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label identity is checked before category; confidence plays no part.
pub fn evaluate(text: Option<&EmotionSignal>, image: Option<&EmotionSignal>) -> ConsistencyVerdict {
    let (Some(text), Some(image)) = (text, image) else {
        return ConsistencyVerdict::NotApplicable;
    };

    if text.same_label(image) {
        ConsistencyVerdict::Consistent
    } else if text.same_category(image) {
        ConsistencyVerdict::Similar
    } else {
        ConsistencyVerdict::Divergent
    }
}
