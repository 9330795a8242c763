use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::screening::types::ScreeningKey;

pub const ENTRY_DELIMITER: char = ';';
pub const NAME_DATE_SEPARATOR: char = ':';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A history entry that had a separator but could not be turned into a record
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ParseError {
    #[error("entry '{entry}' has invalid date '{date}' (expected YYYY-MM-DD)")]
    InvalidDate { entry: String, date: String },

    #[error("entry '{entry}' has no screening name")]
    EmptyName { entry: String },
}

/// Last-performed date per normalized screening name
pub type History = HashMap<ScreeningKey, NaiveDate>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedHistory {
    pub entries: History,
    pub rejected: Vec<ParseError>,
}

impl ParsedHistory {
    /// Fail the whole history on the first rejected entry
    pub fn strict(self) -> std::result::Result<History, ParseError> {
        match self.rejected.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }

    pub fn last_done(&self, key: &ScreeningKey) -> Option<NaiveDate> {
        self.entries.get(key).copied()
    }
}

pub struct HistoryParser;

impl HistoryParser {
    /// Parse `name:YYYY-MM-DD;name:YYYY-MM-DD;...`
    ///
    /// Entries without a `:` are skipped silently. Entries whose date does not
    /// parse are skipped and reported in [`ParsedHistory::rejected`]. The split
    /// happens on the last `:`, so names may themselves contain a colon.
    /// When a name repeats, the later entry wins.
    pub fn parse(raw: Option<&str>) -> ParsedHistory {
        let mut parsed = ParsedHistory::default();

        let Some(raw) = raw else {
            return parsed;
        };

        for entry in raw.split(ENTRY_DELIMITER) {
            let Some((name, date)) = entry.rsplit_once(NAME_DATE_SEPARATOR) else {
                if !entry.trim().is_empty() {
                    debug!("Skipping history entry without separator: '{}'", entry.trim());
                }
                continue;
            };

            let key = ScreeningKey::new(name);
            if key.is_empty() {
                warn!("Rejected history entry '{}': missing screening name", entry.trim());
                parsed.rejected.push(ParseError::EmptyName {
                    entry: entry.trim().to_string(),
                });
                continue;
            }

            match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
                Ok(date) => {
                    parsed.entries.insert(key, date);
                }
                Err(e) => {
                    warn!("Rejected history entry '{}': {}", entry.trim(), e);
                    parsed.rejected.push(ParseError::InvalidDate {
                        entry: entry.trim().to_string(),
                        date: date.trim().to_string(),
                    });
                }
            }
        }

        parsed
    }
}

/// Render a history mapping back into its text form, sorted by name
pub fn format_history(history: &History) -> String {
    let mut entries: Vec<_> = history.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let delimiter = ENTRY_DELIMITER.to_string();
    entries
        .into_iter()
        .map(|(name, date)| format!("{}{}{}", name, NAME_DATE_SEPARATOR, date.format(DATE_FORMAT)))
        .collect::<Vec<_>>()
        .join(delimiter.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert!(HistoryParser::parse(None).entries.is_empty());
        assert!(HistoryParser::parse(Some("")).entries.is_empty());
        assert!(HistoryParser::parse(Some("   ")).entries.is_empty());
        assert!(HistoryParser::parse(Some("")).rejected.is_empty());
    }

    #[test]
    fn test_parses_and_normalizes_names() {
        let parsed = HistoryParser::parse(Some(" Pap Smear :2023-01-01; CHOLESTEROL SCREENING: 2022-05-10 "));
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.last_done(&ScreeningKey::new("pap smear")), Some(date(2023, 1, 1)));
        assert_eq!(
            parsed.last_done(&ScreeningKey::new("Cholesterol Screening")),
            Some(date(2022, 5, 10))
        );
    }

    #[test]
    fn test_entries_without_separator_are_skipped() {
        let parsed = HistoryParser::parse(Some("garbage;Pap Smear:2023-01-01;;"));
        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_bad_date_is_rejected_but_rest_kept() {
        let parsed = HistoryParser::parse(Some("Pap Smear:2023-13-45;HPV PCR Test:2021-03-04"));
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(
            parsed.rejected,
            vec![ParseError::InvalidDate {
                entry: "Pap Smear:2023-13-45".to_string(),
                date: "2023-13-45".to_string(),
            }]
        );
    }

    #[test]
    fn test_wrong_date_format_is_rejected() {
        let parsed = HistoryParser::parse(Some("Pap Smear:01/02/2023"));
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.rejected.len(), 1);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let parsed = HistoryParser::parse(Some(" :2023-01-01"));
        assert!(parsed.entries.is_empty());
        assert!(matches!(parsed.rejected[0], ParseError::EmptyName { .. }));
    }

    #[test]
    fn test_strict_fails_on_first_rejection() {
        let ok = HistoryParser::parse(Some("Pap Smear:2023-01-01")).strict();
        assert_eq!(ok.unwrap().len(), 1);

        let err = HistoryParser::parse(Some("Pap Smear:yesterday;HPV PCR Test:bad")).strict();
        assert!(matches!(err, Err(ParseError::InvalidDate { ref date, .. }) if date == "yesterday"));
    }

    #[test]
    fn test_name_with_colon() {
        let parsed = HistoryParser::parse(Some("HRA: Wellness Screening:2024-02-29"));
        assert_eq!(
            parsed.last_done(&ScreeningKey::new("hra: wellness screening")),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_later_duplicate_wins() {
        let parsed = HistoryParser::parse(Some("Pap Smear:2020-01-01;pap smear:2019-06-01"));
        assert_eq!(parsed.last_done(&ScreeningKey::new("Pap Smear")), Some(date(2019, 6, 1)));
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let mut history = History::new();
        history.insert(ScreeningKey::new("Pap Smear"), date(2023, 1, 1));
        history.insert(ScreeningKey::new("HRA: Wellness Screening"), date(2024, 7, 15));
        history.insert(ScreeningKey::new("Cholesterol Screening"), date(2019, 12, 31));

        let text = format_history(&history);
        let parsed = HistoryParser::parse(Some(&text));

        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.entries, history);
    }
}
