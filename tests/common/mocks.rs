use async_trait::async_trait;
use chat_batch_server::{Error, Result, engine::InferenceEngine};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock inference engine for testing.
///
/// Prompts with a registered response get that response; any other prompt
/// gets `"reply to <prompt>"`. Every batch call is recorded.
#[derive(Debug, Clone)]
pub struct MockEngine {
    pub responses: Arc<Mutex<HashMap<String, String>>>,
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub error: Option<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_response(self, prompt: &str, response: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.to_string(), response.to_string());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceEngine for MockEngine {
    async fn generate_batch(&self, prompts: Vec<String>) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(prompts.clone());

        if let Some(ref error) = self.error {
            return Err(Error::engine(error.clone()));
        }

        let responses = self.responses.lock().unwrap();
        Ok(prompts
            .iter()
            .map(|prompt| {
                responses
                    .get(prompt)
                    .cloned()
                    .unwrap_or_else(|| format!("reply to {}", prompt))
            })
            .collect())
    }
}
