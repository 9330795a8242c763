use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    error::{AdvisorError, Result},
    member::{Gender, Member},
    screening::types::ScreeningKey,
};

/// Days in a recurrence year. Calendar years are not used.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Which genders a screening applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum GenderRule {
    All,
    Only(Gender),
}

impl GenderRule {
    pub fn matches(&self, gender: Gender) -> bool {
        match self {
            GenderRule::All => true,
            GenderRule::Only(g) => *g == gender,
        }
    }
}

impl std::fmt::Display for GenderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenderRule::All => write!(f, "All"),
            GenderRule::Only(g) => write!(f, "{}", g),
        }
    }
}

impl From<GenderRule> for String {
    fn from(rule: GenderRule) -> Self {
        rule.to_string()
    }
}

impl FromStr for GenderRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(GenderRule::All)
        } else {
            s.parse::<Gender>().map(GenderRule::Only)
        }
    }
}

/// One catalog row as it arrives from the data file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreeningRecord {
    pub screening: String,
    pub min_age: u32,
    pub max_age: u32,
    pub gender: String,
    #[serde(default)]
    pub diabetic_only: bool,
    pub refresh_years: f64,
    pub importance: u32,
}

/// A validated catalog rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRule {
    pub name: String,
    #[serde(skip)]
    pub key: ScreeningKey,
    pub min_age: u32,
    pub max_age: u32,
    pub gender: GenderRule,
    pub diabetic_only: bool,
    pub refresh_years: f64,
    pub importance: u32,
}

impl ScreeningRule {
    /// Age, gender and diabetic gates, all of which must pass
    pub fn applies_to(&self, member: &Member) -> bool {
        (self.min_age..=self.max_age).contains(&member.age)
            && self.gender.matches(member.gender)
            && (!self.diabetic_only || member.diabetic)
    }

    /// Recurrence interval in whole days. Fractional days round up.
    pub fn refresh_days(&self) -> u64 {
        (DAYS_PER_YEAR * self.refresh_years).ceil() as u64
    }

    /// First date on which the screening is due again; saturates at the last representable date
    pub fn next_due(&self, last_done: NaiveDate) -> NaiveDate {
        last_done
            .checked_add_days(Days::new(self.refresh_days()))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl TryFrom<ScreeningRecord> for ScreeningRule {
    type Error = AdvisorError;

    fn try_from(record: ScreeningRecord) -> Result<Self> {
        let name = record.screening.trim().to_string();
        let key = ScreeningKey::new(&name);

        if key.is_empty() {
            return Err(AdvisorError::rule("<unnamed>", "screening name is empty"));
        }

        if record.min_age > record.max_age {
            return Err(AdvisorError::rule(
                &name,
                format!("min_age {} exceeds max_age {}", record.min_age, record.max_age),
            ));
        }

        if !record.refresh_years.is_finite() || record.refresh_years <= 0.0 {
            return Err(AdvisorError::rule(
                &name,
                format!("refresh_years must be positive, got {}", record.refresh_years),
            ));
        }

        let gender = record
            .gender
            .parse::<GenderRule>()
            .map_err(|e| AdvisorError::rule(&name, e))?;

        Ok(Self {
            name,
            key,
            min_age: record.min_age,
            max_age: record.max_age,
            gender,
            diabetic_only: record.diabetic_only,
            refresh_years: record.refresh_years,
            importance: record.importance,
        })
    }
}
