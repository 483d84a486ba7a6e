use chat_batch_server::config::{
    Config, EngineConfig, GenerationConfig, LogsConfig, ServerConfig,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8001,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        engine: create_engine_config("http://127.0.0.1:8080/v1"),
        generation: GenerationConfig::default(),
    }
}

pub fn create_engine_config(base_url: &str) -> EngineConfig {
    EngineConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "SmolLM2-135M-Instruct".to_string(),
        request_timeout_secs: 5,
        max_concurrency: 4,
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Build a chat query as JSON
pub fn query(chat_id: &str, user_prompt: &str) -> Value {
    json!({ "chat_id": chat_id, "user_prompt": user_prompt })
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9001
  logs:
    level: "debug"
engine:
  base_url: "http://127.0.0.1:8080/v1"
  api_key: "sk-local"
  model: "SmolLM2-135M-Instruct"
  request_timeout_secs: 60
  max_concurrency: 2
generation:
  max_output_tokens: 64
  temperature: 0.2
  nucleus_threshold: 0.95
  sampling_enabled: false
"#;
