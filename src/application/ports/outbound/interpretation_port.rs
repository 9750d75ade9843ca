//! Interpretation port - What the draw orchestrator needs from a fortune reader

use async_trait::async_trait;

use crate::application::services::InterpretationError;
use crate::domain::entities::FortuneLabel;
use crate::domain::value_objects::{BirthDate, InterpretationContent};

/// Produces interpretation content for a birth date and a drawn fortune
///
/// One call is one attempt; implementations never retry.
#[async_trait]
pub trait InterpretationPort: Send + Sync + 'static {
    async fn interpret(
        &self,
        birth_date: &BirthDate,
        fortune: &FortuneLabel,
    ) -> Result<InterpretationContent, InterpretationError>;
}
