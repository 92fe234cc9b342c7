use crate::core::ranker::{Criterion, Ranker};
use crate::domain::model::ScoredProvider;
use crate::utils::error::{AppinionError, Result};
use serde::Serialize;

/// Which ordering the detailed list ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailMode {
    Value,
    Rating,
    /// No provider had a rating; priced listings are shown as supplied.
    InputOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    NoProviders,
    NoRatableOrPriceableData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SummaryStatus {
    Complete,
    Degenerate(DegenerateReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub best_rated: Option<ScoredProvider>,
    pub cheapest: Option<ScoredProvider>,
    pub best_value: Option<ScoredProvider>,
    pub detailed: Vec<ScoredProvider>,
    pub detail_mode: DetailMode,
    pub status: SummaryStatus,
}

impl Summary {
    fn degenerate(reason: DegenerateReason) -> Self {
        Self {
            best_rated: None,
            cheapest: None,
            best_value: None,
            detailed: Vec::new(),
            detail_mode: DetailMode::InputOrder,
            status: SummaryStatus::Degenerate(reason),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self.status, SummaryStatus::Degenerate(_))
    }
}

pub struct SummarySelector;

impl SummarySelector {
    /// Pick the winner of each ranking and the first `top_n` entries of the detailed view.
    pub fn summarize(providers: &[ScoredProvider], top_n: usize) -> Result<Summary> {
        if top_n == 0 {
            return Err(AppinionError::invalid_configuration(
                "top_n",
                "must be a positive number of providers",
            ));
        }

        if providers.is_empty() {
            return Ok(Summary::degenerate(DegenerateReason::NoProviders));
        }
        if !providers.iter().any(ScoredProvider::is_rankable) {
            return Ok(Summary::degenerate(
                DegenerateReason::NoRatableOrPriceableData,
            ));
        }

        let by_rating = Ranker::rank(providers, Criterion::Rating);
        let by_price = Ranker::rank(providers, Criterion::Price);
        let by_value = Ranker::rank(providers, Criterion::Value);

        let (detailed, detail_mode): (Vec<ScoredProvider>, DetailMode) = if !by_value.is_empty() {
            (by_value.iter().take(top_n).cloned().collect(), DetailMode::Value)
        } else if !by_rating.is_empty() {
            (
                by_rating.iter().take(top_n).cloned().collect(),
                DetailMode::Rating,
            )
        } else {
            tracing::warn!("No provider has a rating, detailed ranking falls back to input order");
            (
                providers
                    .iter()
                    .filter(|p| p.is_rankable())
                    .take(top_n)
                    .cloned()
                    .collect(),
                DetailMode::InputOrder,
            )
        };

        Ok(Summary {
            best_rated: by_rating.head().cloned(),
            cheapest: by_price.head().cloned(),
            best_value: by_value.head().cloned(),
            detailed,
            detail_mode,
            status: SummaryStatus::Complete,
        })
    }
}
