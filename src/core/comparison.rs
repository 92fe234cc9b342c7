use crate::core::engine::{Evaluation, RankingEngine};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;

/// Fetches listings from a source, then hands the finished list to the engine.
pub struct Comparison<S: ListingSource> {
    source: S,
    engine: RankingEngine,
}

impl<S: ListingSource> Comparison<S> {
    pub fn new(source: S, engine: RankingEngine) -> Self {
        Self { source, engine }
    }

    pub async fn run(&self, service: &str) -> Result<Evaluation> {
        // Fetch
        tracing::info!("Fetching '{}' listings from {}", service, self.source.name());
        let listings = self.source.fetch(service).await?;
        tracing::info!("Fetched {} listings", listings.len());

        // Rank
        let evaluation = self.engine.evaluate(service, listings)?;
        if !evaluation.warnings.is_empty() {
            tracing::info!("{} listing values were ignored", evaluation.warnings.len());
        }

        Ok(evaluation)
    }
}
