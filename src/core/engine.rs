use crate::core::normalize::normalize;
use crate::core::price::{PriceEstimator, TierTable};
use crate::core::summary::{Summary, SummarySelector};
use crate::core::value::ValueScorer;
use crate::domain::model::{DataWarning, ProviderRecord, ScoredProvider};
use crate::domain::ports::EngineSettings;
use crate::utils::error::{AppinionError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the presentation layer needs for one service.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub service: String,
    pub target_currency: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    /// Every normalized listing in input order, including unrankable ones.
    pub listings: Vec<ScoredProvider>,
    pub warnings: Vec<DataWarning>,
}

/// Scoring and ranking engine. Parameters are fixed at construction.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    estimator: PriceEstimator,
    scorer: ValueScorer,
    target_currency: String,
    top_n: usize,
}

impl RankingEngine {
    pub fn new(
        estimator: PriceEstimator,
        scorer: ValueScorer,
        target_currency: &str,
        top_n: usize,
    ) -> Result<Self> {
        let target_currency = target_currency.trim().to_uppercase();
        if target_currency.is_empty() {
            return Err(AppinionError::invalid_configuration(
                "target_currency",
                "cannot be empty",
            ));
        }
        if top_n == 0 {
            return Err(AppinionError::invalid_configuration(
                "top_n",
                "must be a positive number of providers",
            ));
        }

        Ok(Self {
            estimator,
            scorer,
            target_currency,
            top_n,
        })
    }

    pub fn from_settings<C: EngineSettings>(settings: &C) -> Result<Self> {
        let tiers = TierTable::new(settings.price_tiers())?;
        Self::new(
            PriceEstimator::new(tiers),
            ValueScorer::default(),
            settings.target_currency(),
            settings.top_n(),
        )
    }

    pub fn target_currency(&self) -> &str {
        &self.target_currency
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Attach estimated prices and value scores to already-normalized records.
    pub fn score_all(&self, records: Vec<ProviderRecord>) -> Vec<ScoredProvider> {
        records
            .into_iter()
            .map(|record| {
                let priced = self.estimator.estimate(record, &self.target_currency);
                let value_score = self.scorer.score(&priced);
                ScoredProvider::new(priced, value_score)
            })
            .collect()
    }

    pub fn evaluate(&self, service: &str, raw: Vec<ProviderRecord>) -> Result<Evaluation> {
        tracing::debug!("Evaluating {} listings for '{}'", raw.len(), service);

        let (records, warnings) = normalize(raw, &self.target_currency);
        let listings = self.score_all(records);
        let summary = SummarySelector::summarize(&listings, self.top_n)?;

        tracing::debug!(
            "Summary for '{}': status {:?}, {} detailed entries ({:?})",
            service,
            summary.status,
            summary.detailed.len(),
            summary.detail_mode
        );

        Ok(Evaluation {
            service: service.to_string(),
            target_currency: self.target_currency.clone(),
            generated_at: Utc::now(),
            summary,
            listings,
            warnings,
        })
    }
}
