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


use affect::messages;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "emotion-analyser")]
#[command(about = messages::APP_TITLE, after_help = messages::APP_DESCRIPTION)]
pub struct Cli {
    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Reconcile the top labels reported by the text and facial classifiers.
    Reconcile(ReconcileArgs),

    /// List the curated emotion labels.
    Taxonomy,

    /// Check that the configured narrative provider answers.
    Health {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    #[arg(long, requires = "text_confidence")]
    pub text_label: Option<String>,

    /// Percentage in [0, 100].
    #[arg(long, requires = "text_label", allow_negative_numbers = true)]
    pub text_confidence: Option<f64>,

    #[arg(long, requires = "image_confidence")]
    pub image_label: Option<String>,

    /// Percentage in [0, 100].
    #[arg(long, requires = "image_label", allow_negative_numbers = true)]
    pub image_confidence: Option<f64>,

    /// Original Portuguese text, forwarded to the narrative service.
    #[arg(long, default_value = "")]
    pub text: String,

    #[arg(long, default_value_t = false)]
    pub narrative: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,
}
