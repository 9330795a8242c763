use thiserror::Error;

use crate::screening::history::ParseError;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid member record '{member}': {reason}")]
    Input { member: String, reason: String },

    #[error("Malformed screening history for '{member}': {source}")]
    History {
        member: String,
        #[source]
        source: ParseError,
    },

    #[error("Invalid screening rule '{screening}': {reason}")]
    Rule { screening: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Report formatting error")]
    Format(#[from] std::fmt::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdvisorError {
    pub(crate) fn input(member: impl Into<String>, reason: impl Into<String>) -> Self {
        AdvisorError::Input {
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn rule(screening: impl Into<String>, reason: impl Into<String>) -> Self {
        AdvisorError::Rule {
            screening: screening.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
