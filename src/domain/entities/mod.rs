//! Domain entities - Core business objects

mod draw_result;
mod fortune;

pub use draw_result::DrawResult;
pub use fortune::{FortuneCatalog, FortuneLabel};
