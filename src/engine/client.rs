use crate::{
    Error, Result,
    config::{EngineConfig, GenerationConfig},
};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{CreateCompletionRequest, CreateCompletionRequestArgs, Prompt},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

/// Turns prompts into generated text.
///
/// Implementations must return exactly one output per prompt, in prompt order.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    async fn generate_batch(&self, prompts: Vec<String>) -> Result<Vec<String>>;

    async fn generate(&self, prompt: String) -> Result<String> {
        let mut outputs = self.generate_batch(vec![prompt]).await?;
        match outputs.len() {
            1 => Ok(outputs.remove(0)),
            n => Err(Error::OutputCountMismatch {
                prompts: 1,
                outputs: n,
            }),
        }
    }
}

/// Engine backed by an OpenAI-compatible `/completions` endpoint
/// (vLLM, llama.cpp server, TGI).
pub struct OpenAiEngine {
    client: Client<OpenAIConfig>,
    model: String,
    generation: GenerationConfig,
    permits: Semaphore,
}

impl OpenAiEngine {
    pub fn new(config: EngineConfig, generation: GenerationConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        // No retries: a failed backend call fails the whole batch
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(no_retry);

        Ok(Self {
            client,
            model: config.model,
            generation,
            permits: Semaphore::new(config.max_concurrency.max(1)),
        })
    }

    fn build_request(&self, prompts: Vec<String>) -> Result<CreateCompletionRequest> {
        build_completion_request(&self.model, &self.generation, prompts)
    }
}

pub(crate) fn build_completion_request(
    model: &str,
    generation: &GenerationConfig,
    prompts: Vec<String>,
) -> Result<CreateCompletionRequest> {
    let (temperature, top_p) = if generation.sampling_enabled {
        (generation.temperature, generation.nucleus_threshold)
    } else {
        // greedy decoding
        (0.0, 1.0)
    };

    let request = CreateCompletionRequestArgs::default()
        .model(model)
        .prompt(Prompt::StringArray(prompts))
        .max_tokens(generation.max_output_tokens)
        .temperature(temperature)
        .top_p(top_p)
        .n(1)
        .build()?;

    Ok(request)
}

/// Places each `(index, text)` choice at its prompt position.
pub(crate) fn order_by_index(
    prompts: usize,
    choices: impl IntoIterator<Item = (u32, String)>,
) -> Result<Vec<String>> {
    let mut slots: Vec<Option<String>> = vec![None; prompts];
    let mut received = 0;

    for (index, text) in choices {
        received += 1;
        let slot = slots.get_mut(index as usize).ok_or_else(|| {
            Error::engine(format!(
                "choice index {} out of range for {} prompts",
                index, prompts
            ))
        })?;
        if slot.replace(text).is_some() {
            return Err(Error::engine(format!("duplicate choice index {}", index)));
        }
    }

    if received != prompts {
        return Err(Error::OutputCountMismatch {
            prompts,
            outputs: received,
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or_else(|| Error::engine(format!("no choice for prompt {}", i))))
        .collect()
}

#[async_trait]
impl InferenceEngine for OpenAiEngine {
    async fn generate_batch(&self, prompts: Vec<String>) -> Result<Vec<String>> {
        let prompt_count = prompts.len();
        if prompt_count == 0 {
            return Ok(Vec::new());
        }

        let request = self.build_request(prompts)?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| Error::engine(format!("engine is shutting down: {}", e)))?;

        debug!(
            "Requesting completions for {} prompts from model {}",
            prompt_count, self.model
        );

        let response = self.client.completions().create(request).await?;

        debug!(
            "Received completion response {} with {} choices",
            response.id,
            response.choices.len()
        );

        order_by_index(
            prompt_count,
            response
                .choices
                .into_iter()
                .map(|choice| (choice.index, choice.text)),
        )
    }
}
