//! Integration tests for the CLI interface
//!
//! Runs the binary against a local fake gateway

mod common;

use assert_cmd::Command;
use cid_enrich::dataset::Dataset;
use common::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("nftDatas.json");
    let records = json!([record_json(1, META_GOOD), record_json(2, META_UNKNOWN)]);
    fs::write(&path, records.to_string()).unwrap();
    path
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("cid-enrich").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--gateway"))
        .stdout(predicate::str::contains("--delay-ms"));
}

#[test]
fn test_invalid_flag() {
    let mut cmd = Command::cargo_bin("cid-enrich").unwrap();
    cmd.arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_missing_input_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.ts");

    let mut cmd = Command::cargo_bin("cid-enrich").unwrap();
    cmd.arg("--input")
        .arg(temp_dir.path().join("absent.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error in main process"));

    assert!(!output.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_run_against_gateway() {
    let addr = spawn_gateway().await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir);
    let output = temp_dir.path().join("nftDatas-updated.ts");

    let args = vec![
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
        "--gateway".to_string(),
        gateway_template(addr),
        "--delay-ms".to_string(),
        "0".to_string(),
    ];

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("cid-enrich")
            .unwrap()
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("Starting to update 2 NFT image IDs..."))
            .stdout(predicate::str::contains("Processing NFT 1 (1/2)..."))
            .stdout(predicate::str::contains("✓ Updated NFT 1: meta-good → img-good"))
            .stdout(predicate::str::contains(
                "✗ Failed to update NFT 2, keeping original imageId",
            ))
            .stdout(predicate::str::contains("Total NFTs processed: 2"))
            .stdout(predicate::str::contains("  Updated:  img-good"))
            .stdout(predicate::str::contains("Process completed successfully!"));
    })
    .await
    .unwrap();

    let written = Dataset::load(&output).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written.records()[0].image_id, "img-good");
    assert_eq!(written.records()[1].image_id, META_UNKNOWN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_file_run() {
    let addr = spawn_gateway().await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir);
    let output = temp_dir.path().join("updated.json");

    let config_path = temp_dir.path().join("cid-enrich.toml");
    fs::write(
        &config_path,
        format!(
            "gateway = {:?}\ninput = {:?}\noutput = {:?}\npacing = \"0ms\"\n",
            gateway_template(addr),
            input.display().to_string(),
            output.display().to_string(),
        ),
    )
    .unwrap();

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("cid-enrich")
            .unwrap()
            .arg("--config")
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("✓ Updated data saved to"));
    })
    .await
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[0]["imageId"], "img-good");
    assert_eq!(written[1]["imageId"], META_UNKNOWN);
}

#[test]
fn test_bad_gateway_fails_after_banner() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.ts");

    let mut cmd = Command::cargo_bin("cid-enrich").unwrap();
    cmd.arg("--gateway")
        .arg("::not a url::")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Starting NFT imageId update process..."))
        .stderr(predicate::str::contains("Error in main process"))
        .stderr(predicate::str::contains("Invalid gateway template"));

    assert!(!output.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_negative_ids_are_processed() {
    let addr = spawn_gateway().await;
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("nftDatas.json");
    fs::write(&input, json!([record_json(-1, META_GOOD)]).to_string()).unwrap();
    let output = temp_dir.path().join("nftDatas-updated.ts");

    let args = vec![
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
        "--gateway".to_string(),
        gateway_template(addr),
        "--delay-ms".to_string(),
        "0".to_string(),
    ];

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("cid-enrich")
            .unwrap()
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("✓ Updated NFT -1: meta-good → img-good"));
    })
    .await
    .unwrap();

    let written = Dataset::load(&output).unwrap();
    assert_eq!(written.records()[0].id, -1);
    assert_eq!(written.records()[0].image_id, "img-good");
}

#[test]
fn test_bad_config_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "retries = 3\n").unwrap();

    let mut cmd = Command::cargo_bin("cid-enrich").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}
