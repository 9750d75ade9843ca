//! Draw result - Terminal value of one draw cycle

use serde::{Deserialize, Serialize};

use super::FortuneLabel;
use crate::domain::value_objects::InterpretationContent;

/// The fortune drawn and its interpretation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub fortune: FortuneLabel,
    pub interpretation: InterpretationContent,
    /// True when the interpretation is the canned fallback
    #[serde(default)]
    pub is_fallback: bool,
}

impl DrawResult {
    pub fn new(fortune: FortuneLabel, interpretation: InterpretationContent) -> Self {
        Self {
            fortune,
            interpretation,
            is_fallback: false,
        }
    }

    pub fn fallback(fortune: FortuneLabel) -> Self {
        Self {
            fortune,
            interpretation: InterpretationContent::fallback(),
            is_fallback: true,
        }
    }
}
