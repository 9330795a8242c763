use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::{
    error::{AdvisorError, Result},
    member::types::{Member, MemberRecord},
};

#[derive(Debug, Deserialize)]
struct MembersFile {
    #[serde(rename = "member", default)]
    members: Vec<MemberRecord>,
}

/// Raw member rows, validated one at a time on lookup
#[derive(Debug, Clone, Default)]
pub struct MemberDirectory {
    records: Vec<MemberRecord>,
}

impl MemberDirectory {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let directory = Self::parse(&text)
            .map_err(|e| AdvisorError::Config(format!("{}: {}", path.display(), e)))?;

        info!("Loaded {} member records from {}", directory.len(), path.display());
        Ok(directory)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file: MembersFile = toml::from_str(text)?;
        Ok(Self::from_records(file.members))
    }

    pub fn from_records(records: Vec<MemberRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a member by name (case and whitespace insensitive) and validate it
    pub fn find(&self, name: &str) -> Result<Member> {
        let wanted = name.trim().to_lowercase();

        let record = self
            .records
            .iter()
            .find(|r| {
                r.name_text()
                    .map(|n| n.trim().to_lowercase() == wanted)
                    .unwrap_or(false)
            })
            .ok_or_else(|| AdvisorError::MemberNotFound(name.trim().to_string()))?;

        debug!("Validating member record '{}'", record.display_name());
        Member::try_from(record.clone())
    }

    /// Every record with its validation outcome, in file order
    pub fn validate_all(&self) -> Vec<(String, Result<Member>)> {
        self.records
            .iter()
            .map(|r| (r.display_name(), Member::try_from(r.clone())))
            .collect()
    }
}
