use std::cmp::Reverse;

use crate::screening::types::EvaluatedScreening;

pub const DEFAULT_TOP_N: usize = 3;

/// Output of [`PriorityRanker::rank`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedScreenings {
    pub priority: Vec<EvaluatedScreening>,
    pub additional: Vec<EvaluatedScreening>,
    pub completed: Vec<EvaluatedScreening>,
}

pub struct PriorityRanker {
    top_n: usize,
}

impl Default for PriorityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl PriorityRanker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Split into priority / additional / completed
    ///
    /// Eligible screenings are ordered by importance, highest first, with ties
    /// kept in catalog order. Completed screenings stay in catalog order.
    pub fn rank(&self, evaluated: Vec<EvaluatedScreening>) -> RankedScreenings {
        let (mut pool, mut completed): (Vec<_>, Vec<_>) =
            evaluated.into_iter().partition(EvaluatedScreening::is_eligible);

        pool.sort_by_key(|s| (Reverse(s.importance().unwrap_or(0)), s.catalog_index));
        completed.sort_by_key(|s| s.catalog_index);

        let additional = pool.split_off(self.top_n.min(pool.len()));

        RankedScreenings {
            priority: pool,
            additional,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::types::ScreeningStatus;
    use chrono::NaiveDate;

    fn eligible(name: &str, index: usize, importance: u32) -> EvaluatedScreening {
        EvaluatedScreening {
            name: name.to_string(),
            catalog_index: index,
            status: ScreeningStatus::Eligible { importance },
        }
    }

    fn completed(name: &str, index: usize) -> EvaluatedScreening {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        EvaluatedScreening {
            name: name.to_string(),
            catalog_index: index,
            status: ScreeningStatus::Completed {
                last_done: day,
                next_due: day,
            },
        }
    }

    fn names(screenings: &[EvaluatedScreening]) -> Vec<&str> {
        screenings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_top_three_by_importance() {
        let ranked = PriorityRanker::default().rank(vec![
            eligible("a", 0, 10),
            eligible("b", 1, 90),
            completed("c", 2),
            eligible("d", 3, 50),
            eligible("e", 4, 70),
            eligible("f", 5, 20),
        ]);

        assert_eq!(names(&ranked.priority), vec!["b", "e", "d"]);
        assert_eq!(names(&ranked.additional), vec!["f", "a"]);
        assert_eq!(names(&ranked.completed), vec!["c"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let ranked = PriorityRanker::new(2).rank(vec![
            eligible("late", 7, 80),
            eligible("early", 1, 80),
            eligible("middle", 4, 80),
        ]);

        assert_eq!(names(&ranked.priority), vec!["early", "middle"]);
        assert_eq!(names(&ranked.additional), vec!["late"]);
    }

    #[test]
    fn test_short_pool_is_not_padded() {
        let ranked = PriorityRanker::default().rank(vec![eligible("only", 0, 5)]);

        assert_eq!(ranked.priority.len(), 1);
        assert!(ranked.additional.is_empty());
        assert!(ranked.completed.is_empty());
    }

    #[test]
    fn test_zero_top_n() {
        let ranked = PriorityRanker::new(0).rank(vec![eligible("a", 0, 5), eligible("b", 1, 6)]);

        assert!(ranked.priority.is_empty());
        assert_eq!(names(&ranked.additional), vec!["b", "a"]);
    }

    #[test]
    fn test_completed_in_catalog_order() {
        let ranked = PriorityRanker::default().rank(vec![completed("z", 9), completed("y", 2)]);

        assert!(ranked.priority.is_empty());
        assert_eq!(names(&ranked.completed), vec!["y", "z"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(PriorityRanker::default().rank(Vec::new()), RankedScreenings::default());
    }
}
