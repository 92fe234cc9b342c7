use crate::domain::model::{EstimatedPrice, PriceBasis, PricedRecord, ProviderRecord};
use crate::utils::error::{AppinionError, Result};

/// Number of Google-style price tiers (0..=4).
pub const TIER_COUNT: usize = 5;

/// Amounts used when no table is configured for the target currency.
pub const DEFAULT_TIER_AMOUNTS: [f64; TIER_COUNT] = [1.0, 15.0, 40.0, 75.0, 150.0];

/// Representative amount for each price tier, indexed by tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    amounts: [f64; TIER_COUNT],
}

impl TierTable {
    /// Amounts must be finite, non-negative and non-decreasing by tier.
    pub fn new(amounts: &[f64]) -> Result<Self> {
        let amounts: [f64; TIER_COUNT] = amounts.try_into().map_err(|_| {
            AppinionError::invalid_configuration(
                "price_tiers",
                format!("expected {} amounts, got {}", TIER_COUNT, amounts.len()),
            )
        })?;

        if let Some(bad) = amounts.iter().find(|a| !a.is_finite() || **a < 0.0) {
            return Err(AppinionError::invalid_configuration(
                "price_tiers",
                format!("amount {} is not a non-negative number", bad),
            ));
        }
        if amounts.windows(2).any(|w| w[1] < w[0]) {
            return Err(AppinionError::invalid_configuration(
                "price_tiers",
                "amounts must not decrease from tier 0 to tier 4",
            ));
        }

        Ok(Self { amounts })
    }

    pub fn amount_for(&self, level: u8) -> Option<f64> {
        self.amounts.get(usize::from(level)).copied()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            amounts: DEFAULT_TIER_AMOUNTS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriceEstimator {
    tiers: TierTable,
}

impl PriceEstimator {
    pub fn new(tiers: TierTable) -> Self {
        Self { tiers }
    }

    /// Attach a price to `record`: the exact price when listed, otherwise the tier
    /// heuristic in `target_currency`. No currency conversion is done.
    pub fn estimate(&self, record: ProviderRecord, target_currency: &str) -> PricedRecord {
        let price = match (record.price, record.price_level) {
            (Some(amount), _) => Some(EstimatedPrice {
                amount,
                currency: record
                    .currency
                    .clone()
                    .unwrap_or_else(|| target_currency.to_string()),
                basis: PriceBasis::Exact,
            }),
            (None, Some(level)) => self.tiers.amount_for(level).map(|amount| EstimatedPrice {
                amount,
                currency: target_currency.to_string(),
                basis: PriceBasis::Tier(level),
            }),
            (None, None) => None,
        };

        if price.is_none() {
            tracing::debug!("{} has no price information", record.provider);
        }

        PricedRecord { record, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur_table() -> TierTable {
        TierTable::new(&[5.0, 15.0, 30.0, 60.0, 100.0]).unwrap()
    }

    #[test]
    fn test_tier_estimate_is_approximate_in_target_currency() {
        let estimator = PriceEstimator::new(eur_table());
        let record = ProviderRecord::new("plumbing", "Pipes & Co").with_price_level(2);

        let priced = estimator.estimate(record, "EUR");
        let price = priced.price.unwrap();

        assert_eq!(price.amount, 30.0);
        assert_eq!(price.currency, "EUR");
        assert_eq!(price.basis, PriceBasis::Tier(2));
        assert!(price.is_approximate());
    }

    #[test]
    fn test_exact_price_passes_through() {
        let estimator = PriceEstimator::new(eur_table());
        let record = ProviderRecord::new("plumbing", "Pipes & Co")
            .with_price(42.5)
            .with_price_level(4)
            .with_currency("USD");

        let price = estimator.estimate(record, "EUR").price.unwrap();

        assert_eq!(price.amount, 42.5);
        assert_eq!(price.currency, "USD");
        assert_eq!(price.basis, PriceBasis::Exact);
    }

    #[test]
    fn test_no_price_information_stays_absent() {
        let estimator = PriceEstimator::default();
        let record = ProviderRecord::new("plumbing", "Pipes & Co").with_rating(4.0, 3);

        assert!(estimator.estimate(record, "EUR").price.is_none());
    }

    #[test]
    fn test_estimates_are_non_decreasing_by_tier() {
        let estimator = PriceEstimator::default();
        let amounts: Vec<f64> = (0..TIER_COUNT as u8)
            .map(|level| {
                let record = ProviderRecord::new("s", "p").with_price_level(level);
                estimator.estimate(record, "EUR").price.unwrap().amount
            })
            .collect();

        assert!(amounts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_tier_table_rejects_bad_shapes() {
        assert!(TierTable::new(&[1.0, 2.0, 3.0]).is_err());
        assert!(TierTable::new(&[1.0, 2.0, 3.0, 2.5, 4.0]).is_err());
        assert!(TierTable::new(&[-1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
        assert!(TierTable::new(&[f64::NAN, 2.0, 3.0, 4.0, 5.0]).is_err());
        assert!(TierTable::new(&[0.0, 0.0, 10.0, 10.0, 20.0]).is_ok());
    }
}
