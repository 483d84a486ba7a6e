mod client;

pub use client::{InferenceEngine, OpenAiEngine};
