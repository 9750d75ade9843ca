//! Application services - Use case implementations
//!
//! This module contains the services behind a fortune draw: prompt building,
//! the LLM-backed interpretation service and the draw orchestrator that
//! overlaps the ceremony with the interpretation request.

pub mod ceremony;
pub mod draw_orchestrator;
pub mod interpretation_service;
pub mod llm;

pub use draw_orchestrator::{DrawError, DrawOrchestrator, DrawPhase, DrawView};
pub use interpretation_service::{InterpretationError, InterpretationService};
