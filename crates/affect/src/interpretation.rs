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


//! Decision tree that explains a pair of signals in Portuguese.
//!
//! Branches are tried in a fixed order and the first match wins, so exact label
//! identity is reported as consistency even though it also implies a category
//! match.

use crate::messages;
use crate::signal::EmotionSignal;
use crate::taxonomy::Category;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationKind {
    Consistent,
    Similar,
    TextPositiveFaceNegative,
    TextNegativeFacePositive,
    Mixed,
    Summary,
}

/// Branch for a pair of signals, `None` when either side is missing.
pub fn classify(text: Option<&EmotionSignal>, image: Option<&EmotionSignal>) -> Option<InterpretationKind> {
    Some(classify_pair(text?, image?))
}

fn classify_pair(text: &EmotionSignal, image: &EmotionSignal) -> InterpretationKind {
    if text.same_label(image) {
        return InterpretationKind::Consistent;
    }
    if text.same_category(image) {
        return InterpretationKind::Similar;
    }

    match (text.category(), image.category()) {
        (Category::Positive, Category::Negative) => InterpretationKind::TextPositiveFaceNegative,
        (Category::Negative, Category::Positive) => InterpretationKind::TextNegativeFacePositive,
        (Category::Neutral, _) | (_, Category::Neutral) => InterpretationKind::Mixed,
        _ => InterpretationKind::Summary,
    }
}

pub fn interpret(text: Option<&EmotionSignal>, image: Option<&EmotionSignal>) -> String {
    let (Some(text), Some(image)) = (text, image) else {
        return messages::INCOMPLETE_ANALYSIS.to_string();
    };
    render(classify_pair(text, image), text, image)
}

fn render(kind: InterpretationKind, text: &EmotionSignal, image: &EmotionSignal) -> String {
    let text_em = text.localized_name();
    let image_em = image.localized_name();
    let text_conf = text.confidence();
    let image_conf = image.confidence();

    match kind {
        InterpretationKind::Consistent => format!(
            "✨ **Emoções consistentes**: Tanto o texto quanto a expressão facial \
             indicam **{text_em}**. Isso sugere que a pessoa está expressando \
             genuinamente esse sentimento, com alta confiabilidade na análise \
             (Texto: {text_conf:.0}%, Imagem: {image_conf:.0}%)."
        ),
        InterpretationKind::Similar => format!(
            "🔄 **Emoções similares**: O texto expressa **{text_em}** ({text_conf:.0}%) \
             enquanto a face demonstra **{image_em}** ({image_conf:.0}%). \
             Ambas são emoções {}s, indicando coerência no estado emocional geral.",
            text.category().localized()
        ),
        InterpretationKind::TextPositiveFaceNegative => format!(
            "⚠️ **Divergência emocional**: O texto sugere **{text_em}** (emoção positiva), \
             mas a expressão facial indica **{image_em}** (emoção negativa). \
             Isso pode indicar uma tentativa de mascarar sentimentos reais ou \
             uma comunicação irônica/sarcástica."
        ),
        InterpretationKind::TextNegativeFacePositive => format!(
            "⚠️ **Divergência emocional**: O texto expressa **{text_em}** (emoção negativa), \
             enquanto a face mostra **{image_em}** (emoção positiva). \
             A pessoa pode estar tentando manter aparências ou o contexto \
             do texto não reflete seu estado emocional real."
        ),
        InterpretationKind::Mixed => format!(
            "📊 **Análise mista**: O texto indica **{text_em}** ({text_conf:.0}%) \
             e a expressão facial mostra **{image_em}** ({image_conf:.0}%). \
             Uma das análises é neutra, sugerindo um estado emocional moderado \
             ou ambíguo."
        ),
        InterpretationKind::Summary => format!(
            "📋 **Resumo**: Texto detectou **{text_em}** ({text_conf:.0}%) e \
             imagem detectou **{image_em}** ({image_conf:.0}%)."
        ),
    }
}
