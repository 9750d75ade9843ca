//! Value objects - Immutable objects defined by their attributes

mod birth_date;
mod ids;
mod interpretation;
mod settings;

pub use birth_date::{BirthDate, ValidationError, YearBounds};
pub use ids::DrawCycleId;
pub use interpretation::{InterpretationContent, INTERPRETATION_FIELDS};
pub use settings::{DrawSettings, FallbackPolicy};
