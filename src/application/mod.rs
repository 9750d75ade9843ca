//! Application layer - Use cases and the ports they depend on
//!
//! This layer contains:
//! - Ports: Interfaces to the LLM backend and the interpretation service
//! - Services: Prompt building, interpretation and draw orchestration

pub mod ports;
pub mod services;
