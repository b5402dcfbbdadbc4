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


//! User-facing strings shown alongside an analysis.

pub const APP_TITLE: &str = "Classificador de Emoções (IA)";
pub const APP_DESCRIPTION: &str =
    "Insira o Texto e/ou carregue uma Imagem para análise de emoções.";

pub const NO_INPUT_ERROR: &str =
    "Por favor, insira texto ou carregue uma imagem para iniciar a análise.";
pub const NO_TEXT_WARNING: &str = "Nenhum texto foi inserido para análise.";
pub const NO_IMAGE_WARNING: &str = "Nenhuma imagem foi carregada para análise.";
pub const COMBINED_WARNING: &str = "Insira texto E imagem para ver o resultado combinado.";

pub const INCOMPLETE_ANALYSIS: &str = "Análise incompleta - necessário texto e imagem.";
pub const NARRATIVE_UNAVAILABLE: &str = "Análise narrativa não disponível no momento.";
pub const NARRATIVE_NOT_REQUESTED: &str = "Análise narrativa não solicitada.";
