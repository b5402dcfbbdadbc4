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


mod args;

use affect::{
    messages, AffectConfig, CombinedAnalysis, EmotionSignal, LlmNarrativeGenerator,
    NarrativeAugmenter, Taxonomy,
};
use anyhow::{bail, Context, Result};
use args::{Cli, Commands, ReconcileArgs};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("debug,reqwest=info,hyper=info,h2=info,hyper_util=info,rustls=info")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,reqwest=warn,hyper=warn,h2=warn,hyper_util=warn,rustls=warn")
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Reconcile(args) => reconcile(args).await,
        Commands::Taxonomy => {
            print_taxonomy();
            Ok(())
        }
        Commands::Health { config } => health(config).await,
    }
}

fn signal_from(label: Option<String>, confidence: Option<f64>) -> Result<Option<EmotionSignal>> {
    let (Some(label), Some(confidence)) = (label, confidence) else {
        return Ok(None);
    };
    if label.trim().is_empty() {
        bail!("emotion label must not be empty");
    }
    if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
        bail!("confidence for '{label}' must be a percentage in [0, 100], got {confidence}");
    }
    Ok(Some(EmotionSignal::normalize(label, confidence)))
}

async fn reconcile(args: ReconcileArgs) -> Result<()> {
    let text_signal = signal_from(args.text_label, args.text_confidence)?;
    let image_signal = signal_from(args.image_label, args.image_confidence)?;

    if text_signal.is_none() && image_signal.is_none() {
        bail!(messages::NO_INPUT_ERROR);
    }

    let analysis = if args.narrative {
        let config = AffectConfig::load(args.config.as_deref()).context("loading configuration")?;
        let augmenter = NarrativeAugmenter::from_settings(&config.narrative.provider);
        let timeout = config.narrative.timeout();
        let reconciled = CombinedAnalysis::reconcile_with_narrative(
            text_signal.clone(),
            image_signal.clone(),
            &args.text,
            &augmenter,
        );
        match tokio::time::timeout(timeout, reconciled).await {
            Ok(analysis) => analysis,
            Err(_) => {
                warn!("Narrative timed out after {:?}", timeout);
                CombinedAnalysis::reconcile(text_signal, image_signal)
            }
        }
    } else {
        CombinedAnalysis::reconcile(text_signal, image_signal)
    };
    info!(consistency = ?analysis.consistency(), "Reconciled");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    match analysis.text_signal() {
        Some(signal) => println!("Texto: {}", signal.display()),
        None => println!("Texto: {}", messages::NO_TEXT_WARNING),
    }
    match analysis.image_signal() {
        Some(signal) => println!("Imagem: {}", signal.display()),
        None => println!("Imagem: {}", messages::NO_IMAGE_WARNING),
    }
    if !analysis.is_complete() {
        println!("{}", messages::COMBINED_WARNING);
    }
    println!("Resumo: {}", analysis.summary());
    println!("Consistência: {}", analysis.consistency());
    println!("Interpretação: {}", analysis.interpretation());
    if args.narrative {
        println!(
            "Narrativa: {}",
            analysis.narrative().unwrap_or(messages::NARRATIVE_UNAVAILABLE)
        );
    }
    Ok(())
}

fn print_taxonomy() {
    for (label, info) in Taxonomy::standard().entries() {
        println!("{label:<16} {:<14} {}", info.localized_name, info.category);
    }
}

async fn health(config: Option<std::path::PathBuf>) -> Result<()> {
    let config = AffectConfig::load(config.as_deref()).context("loading configuration")?;
    let settings = &config.narrative.provider;
    let generator = LlmNarrativeGenerator::from_settings(settings)
        .with_context(|| format!("building {} client", settings.provider))?;
    generator
        .health_check()
        .await
        .with_context(|| format!("{} health check failed", settings.provider))?;
    println!("{} ok ({})", settings.provider, settings.model);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_from_rejects_fractions_above_range() {
        assert!(signal_from(Some("joy".into()), Some(120.0)).is_err());
        assert!(signal_from(Some("joy".into()), Some(-1.0)).is_err());
        assert!(signal_from(None, None).unwrap().is_none());
        let signal = signal_from(Some("joy".into()), Some(92.0)).unwrap().unwrap();
        assert_eq!(signal.localized_name(), "Alegria");
    }
}
