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


use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

fn analyser() -> Result<Command> {
    let mut cmd = Command::cargo_bin("emotion-analyser")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn reconcile_matching_labels_reports_consistent() -> Result<()> {
    analyser()?
        .args([
            "reconcile",
            "--text-label", "joy",
            "--text-confidence", "92",
            "--image-label", "joy",
            "--image-confidence", "88",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Texto: JOY (92.00%)"))
        .stdout(predicate::str::contains("✅ Consistente"))
        .stdout(predicate::str::contains("Emoções consistentes"));
    Ok(())
}

#[test]
fn reconcile_json_carries_divergent_verdict() -> Result<()> {
    let output = analyser()?
        .args([
            "reconcile",
            "--text-label", "joy",
            "--text-confidence", "80",
            "--image-label", "anger",
            "--image-confidence", "75",
            "--json",
        ])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["consistency"], "divergent");
    assert_eq!(value["text_signal"]["localized_name"], "Alegria");
    assert!(value["narrative"].is_null());
    Ok(())
}

#[test]
fn reconcile_single_modality_warns_about_missing_side() -> Result<()> {
    analyser()?
        .args(["reconcile", "--image-label", "sadness", "--image-confidence", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Texto: Nenhum texto"))
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("Análise incompleta"));
    Ok(())
}

#[test]
fn reconcile_without_inputs_fails() -> Result<()> {
    analyser()?
        .arg("reconcile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Por favor"));
    Ok(())
}

#[test]
fn label_without_confidence_is_a_usage_error() -> Result<()> {
    analyser()?
        .args(["reconcile", "--text-label", "joy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--text-confidence"));
    Ok(())
}

#[test]
fn out_of_range_confidence_is_rejected() -> Result<()> {
    analyser()?
        .args(["reconcile", "--text-label", "joy", "--text-confidence", "140"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[0, 100]"));
    Ok(())
}

#[test]
fn taxonomy_lists_curated_labels() -> Result<()> {
    analyser()?
        .arg("taxonomy")
        .assert()
        .success()
        .stdout(predicate::str::contains("joy"))
        .stdout(predicate::str::contains("Alegria"))
        .stdout(predicate::str::contains("positiva"));
    Ok(())
}

#[test]
fn help_shows_application_title() -> Result<()> {
    analyser()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classificador de Emoções"))
        .stdout(predicate::str::contains("análise de emoções"));
    Ok(())
}
