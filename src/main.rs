use anyhow::{Context, Result};
use chat_batch_server::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Picks the effective log level: `RUST_LOG` if set, else `server.logs.level`.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    level.parse::<LevelFilter>().with_context(|| {
        format!(
            "unknown log level '{}' (expected error, warn, info, debug or trace)",
            level
        )
    })?;
    Ok(level)
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr only until tracing is installed
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match resolve_log_level(&config.server.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&log_level);

    info!(
        "Starting chat batch server on {}:{} with log level: {}",
        config.server.host, config.server.port, log_level
    );
    info!(
        "Generation config: max_output_tokens={}, temperature={}, top_p={}, sampling={}",
        config.generation.max_output_tokens,
        config.generation.temperature,
        config.generation.nucleus_threshold,
        config.generation.sampling_enabled
    );

    server::run(config).await?;

    Ok(())
}
