use anyhow::{Context, Result};
use medassist::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is loaded before logging so the level can come from it
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let level = match parse_log_level(&config.server.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG directives win over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Starting AI medical assistant (model {}, log level {})",
        config.gemini.model, level
    );

    server::run(config)
        .await
        .context("medical assistant server stopped")?;

    Ok(())
}
