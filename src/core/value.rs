use crate::domain::model::PricedRecord;

/// Multiplier applied to the rating of a free service instead of dividing by zero.
pub const FREE_SERVICE_MULTIPLIER: f64 = 1e9;

/// Value-for-money: rating per unit of (estimated) price. Higher is better.
#[derive(Debug, Clone, Copy)]
pub struct ValueScorer {
    free_multiplier: f64,
}

impl ValueScorer {
    pub fn new(free_multiplier: f64) -> Self {
        Self { free_multiplier }
    }

    pub fn score(&self, priced: &PricedRecord) -> Option<f64> {
        let rating = priced.record.rating?;
        let price = priced.price.as_ref()?.amount;

        if price > 0.0 {
            Some(rating / price)
        } else if price == 0.0 {
            Some(rating * self.free_multiplier)
        } else {
            None
        }
    }
}

impl Default for ValueScorer {
    fn default() -> Self {
        Self::new(FREE_SERVICE_MULTIPLIER)
    }
}
