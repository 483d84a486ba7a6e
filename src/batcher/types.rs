use serde::{Deserialize, Serialize};

pub const MISSING_CHAT_ID: &str = "chat_id is required and cannot be empty";
pub const MISSING_USER_PROMPT: &str = "user_prompt is required and cannot be empty";

/// A single chat query as received from a client.
///
/// Every field is optional on the wire so that an absent `chat_id` or
/// `user_prompt` is reported by validation instead of by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Outcome for one query. Serializes as `{chat_id, response}` or
/// `{chat_id, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResult {
    Success { chat_id: String, response: String },
    Failure { chat_id: String, error: String },
}

/// A query that failed validation, tagged with the id its error result uses.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidChat {
    pub chat_id: String,
    pub error: &'static str,
}

/// A query that passed validation and is ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedChat {
    pub chat_id: String,
    pub prompt: String,
}

impl ChatRequest {
    pub fn new(chat_id: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            chat_id: Some(chat_id.into()),
            system_prompt: None,
            user_prompt: Some(user_prompt.into()),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Validates the query found at `position` in its batch.
    ///
    /// A blank `chat_id` (absent, empty or whitespace-only) is replaced by
    /// `query_<position>` in the returned error so the result stays addressable.
    pub fn validate(&self, position: usize) -> Result<ValidatedChat, InvalidChat> {
        let chat_id = match non_blank(&self.chat_id) {
            Some(id) => id.to_string(),
            None => {
                return Err(InvalidChat {
                    chat_id: format!("query_{}", position),
                    error: MISSING_CHAT_ID,
                });
            }
        };

        let user_prompt = match non_blank(&self.user_prompt) {
            Some(prompt) => prompt,
            None => {
                return Err(InvalidChat {
                    chat_id,
                    error: MISSING_USER_PROMPT,
                });
            }
        };

        let prompt = prompt_text(self.system_prompt.as_deref(), user_prompt);
        Ok(ValidatedChat { chat_id, prompt })
    }
}

impl ChatResult {
    pub fn success(chat_id: impl Into<String>, response: impl Into<String>) -> Self {
        Self::Success {
            chat_id: chat_id.into(),
            response: response.into(),
        }
    }

    pub fn failure(chat_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure {
            chat_id: chat_id.into(),
            error: error.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        match self {
            Self::Success { chat_id, .. } | Self::Failure { chat_id, .. } => chat_id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl From<InvalidChat> for ChatResult {
    fn from(invalid: InvalidChat) -> Self {
        Self::failure(invalid.chat_id, invalid.error)
    }
}

/// System prompt and user prompt joined by a newline; a missing system
/// prompt counts as empty.
pub fn prompt_text(system_prompt: Option<&str>, user_prompt: &str) -> String {
    format!("{}\n{}", system_prompt.unwrap_or_default(), user_prompt)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
