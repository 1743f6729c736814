//! Runs the `triage` binary end to end

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_VAR: &str = "TRIAGE_CLI_TEST_KEY";

fn triage(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_triage"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TRIAGE_CONFIG")
        .env(KEY_VAR, "sk-test")
        .output()
        .expect("failed to run triage")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// One OpenAI-compatible provider pointed at `base_url`, plus one whose key is never set
fn config_for(base_url: &str) -> String {
    format!(
        r#"
[[providers]]
name = "Mock"
kind = "openai"
api_key_env = "{KEY_VAR}"
base_url = "{base_url}"
timeout_secs = 5

[[providers]]
name = "Keyless"
kind = "claude"
api_key_env = "TRIAGE_CLI_TEST_KEY_NEVER_SET"
"#
    )
}

async fn mock_openai(label: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": label },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let output = triage(dir.path(), &["config"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("# Built-in defaults"));
    assert!(text.contains("Your order is ready for pick up."));
    assert!(text.contains("kind = \"gemini\""));
}

#[test]
fn test_project_config_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write(&dir, "triage.toml", "[orders]\n\"4242\" = \"Delivered.\"\n");

    let output = triage(dir.path(), &["config"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("# Loaded from triage.toml"));
    assert!(text.contains("Delivered."));
    assert!(!text.contains("Your order is ready for pick up."));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "[orders]\n\"12345\" = \"Too long.\"\n");

    let output = triage(dir.path(), &["--config", path.to_str().unwrap(), "config"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("12345"));
}

#[test]
fn test_run_without_credentials_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "triage.toml", &config_for("http://127.0.0.1:9"));
    let fixture = write(
        &dir,
        "queries.json",
        r#"[{"query": "Where is order 1111?", "expected": "ORDER_STATUS"}]"#,
    );

    let output = triage(
        dir.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "run",
            "--model",
            "keyless",
            "--fixture",
            fixture.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Check your API key or LLM configuration."));
    assert!(err.contains("TRIAGE_CLI_TEST_KEY_NEVER_SET"));
}

#[test]
fn test_unknown_model_fails() {
    let dir = TempDir::new().unwrap();
    let output = triage(dir.path(), &["evaluate", "--models", "Nope"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown model 'Nope'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_routes_through_provider() {
    let server = mock_openai("ORDER_STATUS").await;
    let dir = TempDir::new().unwrap();
    write(&dir, "triage.toml", &config_for(&server.uri()));

    let output = triage(dir.path(), &["ask", "Where is order 1111?"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "Order 1111 status: Your order is shipped. Expected delivery in 2 days."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_prints_each_query() {
    let server = mock_openai("FAQ").await;
    let dir = TempDir::new().unwrap();
    write(&dir, "triage.toml", &config_for(&server.uri()));
    let fixture = write(
        &dir,
        "queries.json",
        r#"[{"query": "What are your store hours?", "expected": "FAQ"}]"#,
    );

    let output = triage(dir.path(), &["run", "--fixture", fixture.to_str().unwrap()]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Testing LLM router with Mock"));
    assert!(text.contains("Query: What are your store hours?"));
    assert!(text.contains(
        "Response: We are open from 9am to 8pm Mon-Fri, from 10am to 18pm on Saturday."
    ));
    assert!(text.contains("Expected intent: FAQ"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_evaluate_reports_and_skips() {
    let server = mock_openai("ORDER_STATUS").await;
    let dir = TempDir::new().unwrap();
    write(&dir, "triage.toml", &config_for(&server.uri()));
    let fixture = write(
        &dir,
        "queries.json",
        r#"[
            {"query": "Where is order 1111?", "expected": "ORDER_STATUS"},
            {"query": "Is order 1313 ready?", "expected": "ORDER_STATUS"},
            {"query": "What are your store hours?", "expected": "FAQ"},
            {"query": "Do you ship abroad?", "expected": "FAQ"}
        ]"#,
    );

    let table = triage(dir.path(), &["evaluate", "--fixture", fixture.to_str().unwrap()]);
    assert!(table.status.success(), "{}", stderr(&table));
    let text = stdout(&table);
    assert!(text.contains("Avg Time (s)"));
    assert!(text.contains("50.0%"));
    assert!(text.contains("Skipped"));
    assert!(text.contains("Keyless"));

    let json_output = triage(
        dir.path(),
        &[
            "evaluate",
            "--fixture",
            fixture.to_str().unwrap(),
            "--format",
            "json",
            "--details",
        ],
    );
    assert!(json_output.status.success(), "{}", stderr(&json_output));
    let report: Value = serde_json::from_slice(&json_output.stdout).unwrap();
    assert_eq!(report["results"][0]["model"], "Mock");
    assert_eq!(report["results"][0]["correct"], 2);
    assert_eq!(report["results"][0]["total"], 4);
    assert_eq!(report["results"][0]["cases"].as_array().unwrap().len(), 4);
    assert_eq!(report["skipped"][0]["model"], "Keyless");
}
