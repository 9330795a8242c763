use chrono::NaiveDate;
use tracing::debug;

use crate::{
    catalog::Catalog,
    member::Member,
    screening::{
        history::ParsedHistory,
        types::{EvaluatedScreening, ScreeningStatus},
    },
};

pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Evaluate every catalog rule against a member, in catalog order
    ///
    /// A rule the member fails any gate for produces nothing. Otherwise the
    /// screening is:
    /// 1. Completed, if it was done and `today` is before its next due date
    /// 2. Eligible, if it was never done or its recurrence window has lapsed
    pub fn evaluate(
        member: &Member,
        history: &ParsedHistory,
        catalog: &Catalog,
        today: NaiveDate,
    ) -> Vec<EvaluatedScreening> {
        catalog
            .applicable_to(member)
            .map(|(catalog_index, rule)| {
                let status = match history.last_done(&rule.key) {
                    Some(last_done) => {
                        let next_due = rule.next_due(last_done);
                        if today < next_due {
                            debug!(
                                "{}: '{}' completed {}, next due {}",
                                member.name, rule.name, last_done, next_due
                            );
                            ScreeningStatus::Completed { last_done, next_due }
                        } else {
                            debug!(
                                "{}: '{}' lapsed on {}, eligible again",
                                member.name, rule.name, next_due
                            );
                            ScreeningStatus::Eligible {
                                importance: rule.importance,
                            }
                        }
                    }
                    None => {
                        debug!("{}: '{}' never performed, eligible", member.name, rule.name);
                        ScreeningStatus::Eligible {
                            importance: rule.importance,
                        }
                    }
                };

                EvaluatedScreening {
                    name: rule.name.clone(),
                    catalog_index,
                    status,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{member::Gender, screening::history::HistoryParser};

    const CATALOG: &str = r#"
[[screening]]
screening = "Pap Smear"
min_age = 21
max_age = 65
gender = "Female"
refresh_years = 3
importance = 90

[[screening]]
screening = "HRA: Wellness Screening"
min_age = 18
max_age = 120
gender = "All"
refresh_years = 1
importance = 70

[[screening]]
screening = "AI Diabetic Retinopathy Screening"
min_age = 18
max_age = 120
gender = "All"
diabetic_only = true
refresh_years = 1
importance = 95
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn evaluate(member: &Member, today: NaiveDate) -> Vec<EvaluatedScreening> {
        let catalog = Catalog::parse(CATALOG).unwrap();
        let history = HistoryParser::parse(member.screening_history.as_deref());
        EligibilityEvaluator::evaluate(member, &history, &catalog, today)
    }

    #[test]
    fn test_never_done_is_eligible() {
        let member = Member::new("Thandi", 30, Gender::Female, false);
        let result = evaluate(&member, date(2024, 6, 1));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Pap Smear");
        assert_eq!(result[0].status, ScreeningStatus::Eligible { importance: 90 });
        assert_eq!(result[1].catalog_index, 1);
    }

    #[test]
    fn test_recent_screening_is_completed() {
        let member = Member::new("Thandi", 30, Gender::Female, false)
            .with_history("pap smear:2023-01-01");
        let result = evaluate(&member, date(2024, 6, 1));

        assert_eq!(
            result[0].status,
            ScreeningStatus::Completed {
                last_done: date(2023, 1, 1),
                next_due: date(2025, 12, 31),
            }
        );
    }

    #[test]
    fn test_lapsed_screening_is_eligible_again() {
        let member = Member::new("Thandi", 30, Gender::Female, false)
            .with_history("pap smear:2023-01-01");
        let result = evaluate(&member, date(2026, 6, 1));

        assert_eq!(result[0].status, ScreeningStatus::Eligible { importance: 90 });
    }

    #[test]
    fn test_due_on_exact_next_due_date() {
        let member = Member::new("Thandi", 30, Gender::Female, false)
            .with_history("HRA: Wellness Screening:2024-01-01");

        let day_before = evaluate(&member, date(2024, 12, 30));
        assert!(!day_before[1].is_eligible());

        let on_the_day = evaluate(&member, date(2024, 12, 31));
        assert!(on_the_day[1].is_eligible());
    }

    #[test]
    fn test_inapplicable_rules_produce_nothing() {
        let male = Member::new("Sipho", 40, Gender::Male, false).with_history("Pap Smear:2023-01-01");
        let result = evaluate(&male, date(2024, 6, 1));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "HRA: Wellness Screening");
    }

    #[test]
    fn test_diabetic_member_gets_diabetic_rules() {
        let member = Member::new("Sipho", 40, Gender::Male, true);
        let result = evaluate(&member, date(2024, 6, 1));

        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["HRA: Wellness Screening", "AI Diabetic Retinopathy Screening"]);
    }

    #[test]
    fn test_future_dated_history_is_completed() {
        let member = Member::new("Thandi", 30, Gender::Female, false)
            .with_history("Pap Smear:2030-01-01");
        let result = evaluate(&member, date(2024, 6, 1));

        assert_eq!(result[0].last_done(), Some(date(2030, 1, 1)));
    }
}
