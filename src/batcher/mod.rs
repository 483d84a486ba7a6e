mod types;

pub use types::{
    ChatRequest, ChatResult, InvalidChat, MISSING_CHAT_ID, MISSING_USER_PROMPT, ValidatedChat,
    prompt_text,
};

use crate::{Error, Result, engine::InferenceEngine};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validates chat queries, runs the valid ones through the engine in a single
/// batched call, and hands back one result per query in input order.
#[derive(Clone)]
pub struct Batcher {
    engine: Arc<dyn InferenceEngine>,
}

impl Batcher {
    pub fn new(engine: Arc<dyn InferenceEngine>) -> Self {
        Self { engine }
    }

    pub async fn process(&self, requests: &[ChatRequest]) -> Result<Vec<ChatResult>> {
        if requests.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let outcomes: Vec<std::result::Result<ValidatedChat, InvalidChat>> = requests
            .iter()
            .enumerate()
            .map(|(position, request)| request.validate(position))
            .collect();

        let prompts: Vec<String> = outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().ok())
            .map(|valid| valid.prompt.clone())
            .collect();
        let prompt_count = prompts.len();

        for invalid in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
            warn!("Rejected query {}: {}", invalid.chat_id, invalid.error);
        }

        let outputs = if prompts.is_empty() {
            info!(
                "No valid queries in batch of {}, skipping engine",
                requests.len()
            );
            Vec::new()
        } else {
            debug!("Dispatching {} prompts to the engine", prompt_count);
            self.engine.generate_batch(prompts).await?
        };

        if outputs.len() != prompt_count {
            return Err(Error::OutputCountMismatch {
                prompts: prompt_count,
                outputs: outputs.len(),
            });
        }

        let mut outputs = outputs.into_iter();
        let results = outcomes
            .into_iter()
            .map(|outcome| match outcome {
                Ok(valid) => outputs
                    .next()
                    .map(|response| ChatResult::success(valid.chat_id, response))
                    .ok_or_else(|| Error::internal("engine outputs exhausted during reassembly")),
                Err(invalid) => Ok(invalid.into()),
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Processed batch of {} queries ({} generated)",
            results.len(),
            prompt_count
        );

        Ok(results)
    }

    /// Runs a single query. Unlike [`Batcher::process`], a validation failure
    /// fails the whole call.
    pub async fn process_one(&self, request: &ChatRequest) -> Result<ChatResult> {
        let valid = request
            .validate(0)
            .map_err(|invalid| Error::validation(invalid.error))?;

        let response = self.engine.generate(valid.prompt).await?;
        Ok(ChatResult::success(valid.chat_id, response))
    }
}
