//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Ollama: LLM integration for fortune interpretations
//! - Export: Saving result cards
//! - Terminal: Interactive presentation
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod export;
pub mod ollama;
pub mod state;
pub mod terminal;
