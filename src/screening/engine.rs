use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    clock::Clock,
    config::EngineConfig,
    error::{AdvisorError, Result},
    member::Member,
    screening::{
        eligibility::EligibilityEvaluator,
        history::HistoryParser,
        ranking::{PriorityRanker, RankedScreenings},
        types::ResultSet,
    },
};

/// Entry point for evaluating a member against the screening catalog
///
/// The catalog is shared read-only, so one engine can serve several threads.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
}

impl ScreeningEngine {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse history, evaluate every rule and rank the result
    pub fn compute(&self, member: &Member, today: NaiveDate) -> Result<ResultSet> {
        let history = HistoryParser::parse(member.screening_history.as_deref());

        if !history.rejected.is_empty() {
            if self.config.strict_history {
                if let Err(source) = history.clone().strict() {
                    return Err(AdvisorError::History {
                        member: member.name.clone(),
                        source,
                    });
                }
            }
            warn!(
                "Skipped {} malformed history entries for {}",
                history.rejected.len(),
                member.name
            );
        }

        let evaluated = EligibilityEvaluator::evaluate(member, &history, &self.catalog, today);
        let RankedScreenings {
            priority,
            additional,
            completed,
        } = PriorityRanker::new(self.config.top_n).rank(evaluated);

        info!(
            "Evaluated {} as of {}: {} priority, {} additional, {} completed",
            member.name,
            today,
            priority.len(),
            additional.len(),
            completed.len()
        );

        Ok(ResultSet {
            priority,
            additional,
            completed,
            rejected_history: history.rejected,
        })
    }

    /// Same as [`compute`](Self::compute), with today taken from `clock`
    pub fn compute_with_clock(&self, member: &Member, clock: &dyn Clock) -> Result<ResultSet> {
        self.compute(member, clock.today())
    }
}
