use crate::batcher::{ChatRequest, ChatResult};
use serde::{Deserialize, Serialize};

pub const PARTIAL_SUCCESS_MESSAGE: &str = "Some queries failed but others succeeded";

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub queries: Option<Vec<ChatRequest>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub responses: Vec<ChatResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchResponse {
    pub fn new(responses: Vec<ChatResult>) -> Self {
        let partial = responses.iter().any(ChatResult::is_error);
        Self {
            responses,
            partial_success: partial.then_some(true),
            message: partial.then(|| PARTIAL_SUCCESS_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
