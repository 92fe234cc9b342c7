use crate::domain::model::ProviderRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the raw listings for one service. Fetching must complete before ranking starts.
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, service: &str) -> Result<Vec<ProviderRecord>>;
}

/// Engine parameters resolved by the configuration layer.
pub trait EngineSettings: Send + Sync {
    fn target_currency(&self) -> &str;
    fn top_n(&self) -> usize;
    fn price_tiers(&self) -> &[f64];
}
