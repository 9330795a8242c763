pub mod loader;
pub mod rule;

pub use loader::Catalog;
pub use rule::{GenderRule, ScreeningRecord, ScreeningRule};
