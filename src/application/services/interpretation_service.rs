//! Interpretation Service - AI-generated fortune readings
//!
//! This service turns a birth date and a drawn fortune into structured
//! interpretation content using a Large Language Model. It handles:
//!
//! - Building the persona and schema prompt
//! - Sending a single JSON-mode request (no retry)
//! - Extracting and validating the JSON object from the reply

use std::time::Duration;

use async_trait::async_trait;

use super::llm::prompt_builder::{build_interpretation_prompt, build_system_prompt};
use crate::application::ports::outbound::{ChatMessage, InterpretationPort, LlmPort, LlmRequest};
use crate::domain::entities::FortuneLabel;
use crate::domain::value_objects::{BirthDate, InterpretationContent};

/// Service for generating fortune interpretations
///
/// # Example
///
/// ```ignore
/// use madao_fortune::application::services::InterpretationService;
/// use madao_fortune::infrastructure::ollama::OllamaClient;
///
/// let client = OllamaClient::new("http://localhost:11434/v1", "llama3.2");
/// let service = InterpretationService::new(client);
///
/// let date = BirthDate::parse("15", "1", "1995", YearBounds::default())?;
/// let content = service.interpret(&date, &FortuneLabel::new("1", "Đại Cát")).await?;
/// ```
pub struct InterpretationService<L: LlmPort> {
    llm: L,
    timeout: Option<Duration>,
}

impl<L: LlmPort> InterpretationService<L> {
    /// Create a new interpretation service with the provided client
    pub fn new(llm: L) -> Self {
        Self { llm, timeout: None }
    }

    /// Give up on the backend after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Generate an interpretation for one birth date and fortune
    pub async fn generate_interpretation(
        &self,
        birth_date: &BirthDate,
        fortune: &FortuneLabel,
    ) -> Result<InterpretationContent, InterpretationError> {
        let llm_request = LlmRequest::new(vec![ChatMessage::user(build_interpretation_prompt(
            birth_date, fortune,
        ))])
        .with_system_prompt(build_system_prompt())
        .with_temperature(1.0)
        .with_json_response();

        tracing::debug!(%birth_date, fortune = %fortune.name, "Requesting interpretation");

        let call = self.llm.generate(llm_request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| InterpretationError::Timeout(limit))?,
            None => call.await,
        }
        .map_err(|e| InterpretationError::LlmError(e.to_string()))?;

        tracing::debug!(
            model = %response.model,
            tokens = response.tokens_used,
            "Interpretation received"
        );

        parse_interpretation(&response.content)
    }
}

#[async_trait]
impl<L: LlmPort + 'static> InterpretationPort for InterpretationService<L> {
    async fn interpret(
        &self,
        birth_date: &BirthDate,
        fortune: &FortuneLabel,
    ) -> Result<InterpretationContent, InterpretationError> {
        self.generate_interpretation(birth_date, fortune).await
    }
}

/// Parse the LLM reply into interpretation content
///
/// Models sometimes wrap the object in prose or a code fence, so only the
/// text between the first `{` and the last `}` is decoded.
pub fn parse_interpretation(content: &str) -> Result<InterpretationContent, InterpretationError> {
    let start = content
        .find('{')
        .ok_or_else(|| InterpretationError::ParseError("No JSON object in response".to_string()))?;
    let end = content
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| InterpretationError::ParseError("Unterminated JSON object".to_string()))?;

    let interpretation: InterpretationContent = serde_json::from_str(&content[start..=end])
        .map_err(|e| InterpretationError::ParseError(e.to_string()))?;

    interpretation
        .validate()
        .map_err(|e| InterpretationError::ParseError(e.to_string()))?;

    Ok(interpretation)
}

/// Errors that can occur in the interpretation service
#[derive(Debug, Clone, thiserror::Error)]
pub enum InterpretationError {
    /// Error from the underlying LLM client
    #[error("LLM error: {0}")]
    LlmError(String),
    /// Error parsing the LLM response
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The backend did not answer in time
    #[error("Interpretation timed out after {0:?}")]
    Timeout(Duration),
}
