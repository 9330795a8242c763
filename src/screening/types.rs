use chrono::NaiveDate;
use serde::Serialize;

use crate::screening::history::ParseError;

/// Field labels shared with the rendering layer.
pub mod labels {
    pub const SCREENING: &str = "Screening";
    pub const IMPORTANCE: &str = "Importance";
    pub const LAST_DONE: &str = "Last Done";
    pub const NEXT_AVAILABLE: &str = "Next Available";
}

/// Canonical form of a screening name.
///
/// Catalog rules and history entries both go through this type, so a lookup
/// is insensitive to surrounding whitespace and letter case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScreeningKey(String);

impl ScreeningKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ScreeningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of evaluating one applicable screening for a member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Status")]
pub enum ScreeningStatus {
    /// Never performed, or its recurrence window has lapsed
    Eligible {
        #[serde(rename = "Importance")]
        importance: u32,
    },
    /// Performed recently enough that it is not due yet
    Completed {
        #[serde(rename = "Last Done")]
        last_done: NaiveDate,
        #[serde(rename = "Next Available")]
        next_due: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedScreening {
    #[serde(rename = "Screening")]
    pub name: String,
    /// Position of the rule in the catalog; used as the deterministic tie-breaker.
    #[serde(skip)]
    pub catalog_index: usize,
    #[serde(flatten)]
    pub status: ScreeningStatus,
}

impl EvaluatedScreening {
    pub fn importance(&self) -> Option<u32> {
        match self.status {
            ScreeningStatus::Eligible { importance } => Some(importance),
            ScreeningStatus::Completed { .. } => None,
        }
    }

    pub fn last_done(&self) -> Option<NaiveDate> {
        match self.status {
            ScreeningStatus::Completed { last_done, .. } => Some(last_done),
            ScreeningStatus::Eligible { .. } => None,
        }
    }

    pub fn next_due(&self) -> Option<NaiveDate> {
        match self.status {
            ScreeningStatus::Completed { next_due, .. } => Some(next_due),
            ScreeningStatus::Eligible { .. } => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self.status, ScreeningStatus::Eligible { .. })
    }
}

/// Three disjoint buckets produced for one member
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub priority: Vec<EvaluatedScreening>,
    pub additional: Vec<EvaluatedScreening>,
    pub completed: Vec<EvaluatedScreening>,
    /// History entries skipped because their date (or name) could not be parsed
    pub rejected_history: Vec<ParseError>,
}

impl ResultSet {
    /// Number of screenings that applied to the member
    pub fn total(&self) -> usize {
        self.priority.len() + self.additional.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        assert_eq!(ScreeningKey::new("  Pap Smear "), ScreeningKey::new("pap smear"));
        assert_eq!(ScreeningKey::new("HPV PCR Test").as_str(), "hpv pcr test");
        assert!(ScreeningKey::new("   ").is_empty());
    }

    #[test]
    fn test_status_accessors() {
        let eligible = EvaluatedScreening {
            name: "Pap Smear".to_string(),
            catalog_index: 0,
            status: ScreeningStatus::Eligible { importance: 90 },
        };
        assert_eq!(eligible.importance(), Some(90));
        assert_eq!(eligible.last_done(), None);
        assert!(eligible.is_eligible());

        let done = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let completed = EvaluatedScreening {
            name: "Pap Smear".to_string(),
            catalog_index: 0,
            status: ScreeningStatus::Completed { last_done: done, next_due: due },
        };
        assert_eq!(completed.importance(), None);
        assert_eq!(completed.next_due(), Some(due));
        assert!(!completed.is_eligible());
    }

    #[test]
    fn test_serialized_field_labels() {
        let completed = EvaluatedScreening {
            name: "Pap Smear".to_string(),
            catalog_index: 4,
            status: ScreeningStatus::Completed {
                last_done: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                next_due: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            },
        };
        let value = serde_json::to_value(&completed).unwrap();
        assert_eq!(value[labels::SCREENING], "Pap Smear");
        assert_eq!(value[labels::LAST_DONE], "2023-01-01");
        assert_eq!(value[labels::NEXT_AVAILABLE], "2026-01-01");
        assert_eq!(value["Status"], "Completed");
        assert!(value.get("catalog_index").is_none());
    }
}
