pub mod document;
pub mod formatters;

pub use document::{render_report, ReportContext};
