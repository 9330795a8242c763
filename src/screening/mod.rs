pub mod eligibility;
pub mod engine;
pub mod history;
pub mod ranking;
pub mod types;

pub use eligibility::EligibilityEvaluator;
pub use engine::ScreeningEngine;
pub use history::{format_history, HistoryParser, ParseError, ParsedHistory};
pub use ranking::{PriorityRanker, RankedScreenings, DEFAULT_TOP_N};
pub use types::{labels, EvaluatedScreening, ResultSet, ScreeningKey, ScreeningStatus};
