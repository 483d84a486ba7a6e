pub mod batcher;
pub mod config;
pub mod engine;
pub mod error;
pub mod server;

pub use error::{Error, Result};
