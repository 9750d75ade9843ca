//! Mã Đáo Thành Công - Tết fortune draw
//!
//! The app:
//! - Reads a birth date in the terminal
//! - Draws a fortune from a fixed catalog
//! - Asks an LLM (Ollama or any OpenAI-compatible backend) for the reading
//!   while the horse ceremony plays
//! - Prints a result card that can be saved as JSON

mod application;
mod domain;
mod infrastructure;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::value_objects::DrawSettings;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::state::AppState;
use crate::infrastructure::terminal::TerminalApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging; stdout belongs to the card
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "madao_fortune=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Mã Đáo fortune draw");

    // Load configuration
    let config = AppConfig::from_env()?;
    let settings = DrawSettings::from_env();
    let state = AppState::new(config, settings);
    tracing::info!("Configuration loaded");
    tracing::info!("  LLM: {} ({})", state.config.llm_base_url, state.config.llm_model);
    tracing::info!("  Ceremony: {:?}", state.settings.ceremony_duration());
    tracing::info!("  Fallback policy: {:?}", state.settings.fallback_policy);
    tracing::info!("  Export dir: {}", state.exporter.dir().display());

    let mut app = TerminalApp::new(state.orchestrator(), state.exporter.clone());
    app.run().await?;

    tracing::info!("Goodbye");
    Ok(())
}
