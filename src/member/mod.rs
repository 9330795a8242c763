pub mod loader;
pub mod types;

pub use loader::MemberDirectory;
pub use types::{Gender, Member, MemberRecord, RawValue};
