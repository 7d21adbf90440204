//! Integration tests for the streamcut CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn streamcut() -> Command {
    Command::cargo_bin("streamcut").unwrap()
}

#[test]
fn test_split_english_text() {
    streamcut()
        .arg("split")
        .arg("-i")
        .arg(fixture_path("english-answer.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust programs compile to native code.\n"))
        .stdout(predicate::str::contains(
            "However, some checks still happen at runtime.\n",
        ));
}

#[test]
fn test_split_markdown_answer() {
    streamcut()
        .args(["split", "-f", "markdown", "-i"])
        .arg(fixture_path("chinese-answer.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1. # 安装指南"))
        .stdout(predicate::str::contains("4. 2. 运行安装脚本"))
        .stdout(predicate::str::contains("*Total sentences: 5*"));
}

#[test]
fn test_replay_text_output() {
    streamcut()
        .arg("replay")
        .arg("-i")
        .arg(fixture_path("chinese-answer.md"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# 安装指南\n\n"))
        .stdout(predicate::str::contains("总之，整个过程只需要几分钟。"));
}

#[test]
fn test_replay_json_output() {
    let output = streamcut()
        .args(["replay", "-f", "json", "--chunk-chars", "7", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert!(records.len() >= 2);
    assert_eq!(records.last().unwrap()["cut"], "flush");
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["index"], i);
        assert!(record["delayMs"].is_u64());
        assert!(record.get("source").is_none());
    }
}

#[test]
fn test_replay_markdown_output() {
    streamcut()
        .args(["replay", "-f", "markdown", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(" ms)_"))
        .stdout(predicate::str::contains("*Total segments:"));
}

#[test]
fn test_replay_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("segments.txt");

    streamcut()
        .arg("replay")
        .arg("-i")
        .arg(fixture_path("english-answer.txt"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("In conclusion, most errors surface early."));
}

#[test]
fn test_glob_pattern_tags_sources() {
    let output = streamcut()
        .args(["split", "-q", "-f", "json", "-i", "tests/fixtures/*"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 9);
    assert!(records[0]["source"]
        .as_str()
        .unwrap()
        .ends_with("chinese-answer.md"));
    assert!(records[8]["source"]
        .as_str()
        .unwrap()
        .ends_with("english-answer.txt"));
}

#[test]
fn test_invalid_file() {
    streamcut()
        .args(["replay", "-i", "nonexistent-answer.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_zero_chunk_size_rejected() {
    streamcut()
        .args(["replay", "--chunk-chars", "0", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_unknown_pace_rejected() {
    streamcut()
        .args(["replay", "--pace", "warp", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("warp"));
}

#[test]
fn test_generated_config_drives_replay() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("streamcut.toml");

    streamcut()
        .args(["generate-config", "--pace", "relaxed", "-o"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("max_segment_chars = 400"));

    streamcut()
        .args(["replay", "-f", "json", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"delayMs\""));
}

#[test]
fn test_config_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[segmentation]\ncoherence_window = 0\n").unwrap();

    streamcut()
        .env("STREAMCUT_CONFIG", &config_path)
        .args(["replay", "-i"])
        .arg(fixture_path("english-answer.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("coherence_window"));
}

#[test]
fn test_list_presets() {
    streamcut()
        .args(["list", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fast"))
        .stdout(predicate::str::contains("balanced"))
        .stdout(predicate::str::contains("relaxed"));
}

#[test]
fn test_list_formats() {
    streamcut()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_help_output() {
    streamcut()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("generate-config"));
}
