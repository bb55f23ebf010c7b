use assert_cmd::Command;
use axum::http::StatusCode;
use predicates::prelude::*;

mod common;

fn verifylens(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("verifylens").unwrap();
    cmd.current_dir(workdir)
        .env_remove("VERIFYLENS_API_URL")
        .env_remove("VERIFYLENS_OUTPUT_FORMAT")
        .env_remove("VERIFYLENS_LOG_LEVEL")
        .env_remove("VERIFYLENS_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_PROXY", "127.0.0.1,localhost");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    verifylens(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn analyze_prints_results() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = runtime.block_on(common::spawn_service(StatusCode::OK, common::VERDICT));
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("claims.txt");
    std::fs::write(&input, "The moon is made of cheese.").unwrap();

    verifylens(dir.path())
        .args(["analyze", "--input"])
        .arg(&input)
        .args(["--api-url", service.url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis Results"))
        .stdout(predicate::str::contains("\"authentic\""));

    assert_eq!(service.requests().len(), 1);
}

#[test]
fn analyze_json_output_is_the_document() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = runtime.block_on(common::spawn_service(StatusCode::OK, common::VERDICT));
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    std::fs::write(&input, [0u8; 32]).unwrap();

    let output = verifylens(dir.path())
        .args(["analyze", "--format", "json", "--input"])
        .arg(&input)
        .env("VERIFYLENS_API_URL", &service.url)
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["label"], "authentic");
    assert_eq!(service.requests()[0].media_type, "video");
}

#[test]
fn analyze_reports_service_failure() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = runtime.block_on(common::spawn_service(
        StatusCode::INTERNAL_SERVER_ERROR,
        "boom",
    ));
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    std::fs::write(&input, [0u8; 32]).unwrap();

    verifylens(dir.path())
        .args(["analyze", "--input"])
        .arg(&input)
        .args(["--api-url", service.url.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Analysis failed: Internal Server Error",
        ));
}

#[test]
fn analyze_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    verifylens(dir.path())
        .args(["analyze", "--input", "does-not-exist.txt"])
        .args(["--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to analyze does-not-exist.txt"));
}

#[test]
fn analyze_rejects_unknown_media_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    std::fs::write(&input, [0u8; 4]).unwrap();

    verifylens(dir.path())
        .args(["analyze", "--media-type", "image", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid media type"));
}

#[test]
fn info_prints_descriptor() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = runtime.block_on(common::spawn_service(StatusCode::OK, common::VERDICT));
    let dir = tempfile::tempdir().unwrap();

    verifylens(dir.path())
        .args(["info", "--api-url", service.url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service Information"))
        .stdout(predicate::str::contains("VerifyLens API"));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();

    verifylens(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("verifylens.toml").exists());

    verifylens(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    verifylens(dir.path())
        .args(["config", "show", "--api-url", "http://localhost:8000/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = http://localhost:8000\n"))
        .stdout(predicate::str::contains("source = verifylens.toml"));
}
