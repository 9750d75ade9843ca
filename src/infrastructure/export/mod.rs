//! Result export functionality
//!
//! Finished draws can be saved as JSON result cards for sharing.

mod result_card;

pub use result_card::CardExporter;
