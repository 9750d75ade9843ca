//! Shared application state

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::services::{DrawOrchestrator, InterpretationService};
use crate::domain::entities::FortuneCatalog;
use crate::domain::value_objects::DrawSettings;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::CardExporter;
use crate::infrastructure::ollama::OllamaClient;

pub type Interpreter = InterpretationService<OllamaClient>;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub settings: DrawSettings,
    pub interpreter: Arc<Interpreter>,
    pub exporter: CardExporter,
}

impl AppState {
    pub fn new(config: AppConfig, settings: DrawSettings) -> Self {
        // Initialize LLM client
        let llm_client = OllamaClient::new(&config.llm_base_url, &config.llm_model)
            .with_api_key(config.llm_api_key.clone());

        let interpreter = InterpretationService::new(llm_client).with_timeout(config.request_timeout);
        let exporter = CardExporter::new(config.export_dir.clone());

        Self {
            config,
            settings,
            interpreter: Arc::new(interpreter),
            exporter,
        }
    }

    /// A fresh orchestrator seeded from the OS entropy source
    pub fn orchestrator(&self) -> DrawOrchestrator<Interpreter, StdRng> {
        DrawOrchestrator::new(
            Arc::clone(&self.interpreter),
            FortuneCatalog::standard(),
            self.settings.clone(),
            StdRng::from_entropy(),
        )
    }
}
