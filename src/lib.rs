pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod member;
pub mod report;
pub mod screening;
pub mod utils;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{AdvisorError, Result};
pub use member::{Member, MemberDirectory};
pub use screening::{ResultSet, ScreeningEngine};
