//! Outbound ports - Interfaces that the application requires from external systems

mod interpretation_port;
mod llm_port;

pub use interpretation_port::InterpretationPort;
pub use llm_port::{ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole};
