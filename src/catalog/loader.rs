use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::{
    catalog::rule::{ScreeningRecord, ScreeningRule},
    error::{AdvisorError, Result},
    member::Member,
};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "screening", default)]
    screenings: Vec<ScreeningRecord>,
}

/// Validated, read-only set of screening rules in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    rules: Vec<ScreeningRule>,
}

impl Catalog {
    /// Load and validate a catalog file
    ///
    /// Any malformed rule fails the whole load, before a single member is evaluated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&text).map_err(|e| match e {
            AdvisorError::Toml(e) => AdvisorError::Config(format!("{}: {}", path.display(), e)),
            other => other,
        })?;

        info!("Loaded {} screening rules from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_records(file.screenings)
    }

    pub fn from_records(records: Vec<ScreeningRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(records.len());

        for record in records {
            let rule = ScreeningRule::try_from(record)?;
            if !seen.insert(rule.key.clone()) {
                return Err(AdvisorError::rule(&rule.name, "duplicate screening name"));
            }
            debug!("Validated screening rule '{}'", rule.name);
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ScreeningRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose applicability gates the member passes, with their catalog positions
    pub fn applicable_to<'a>(
        &'a self,
        member: &'a Member,
    ) -> impl Iterator<Item = (usize, &'a ScreeningRule)> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.applies_to(member))
    }
}
