use super::mocks::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use prompt_relay::{
    Result,
    chain::{Chain, DecodingParams, PromptTemplate},
    server::{handlers::AppState, router},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

pub const DEFAULT_TEMPLATE: &str = "Answer this: {question}";

pub fn default_params() -> DecodingParams {
    DecodingParams {
        max_tokens: 512,
        temperature: 0.7,
    }
}

/// Build a chain around the given mock client with the default template.
pub fn create_test_chain(llm: Arc<MockLlmClient>) -> Chain {
    let prompt = PromptTemplate::from_template(DEFAULT_TEMPLATE).unwrap();
    Chain::new(prompt, llm, default_params()).unwrap()
}

/// Build the real router backed by a mock LLM client.
pub fn create_test_app(llm: Arc<MockLlmClient>) -> Router {
    router(AppState {
        chain: Arc::new(create_test_chain(llm)),
    })
}

pub fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn query_request(body: &Value) -> Request<Body> {
    json_request("POST", "/query", body.to_string())
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "0.0.0.0"
  port: 8080
  logs:
    level: "debug"

llm:
  base_url: "http://localhost:4000/v1"
  api_key: "test-api-key"
  model: "anthropic.claude-3-sonnet-20240229-v1:0"
  max_tokens: 256
  temperature: 0.2
  request_timeout_secs: 30

prompt:
  template: "Answer this: {question}"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: "not-a-number"
"#;
