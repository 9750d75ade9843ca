//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Fortune labels and the catalog, draw results
//! - Value Objects: Birth date, interpretation content, settings, ids

pub mod entities;
pub mod value_objects;
