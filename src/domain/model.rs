use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One listing as supplied by a listings source, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawListing")]
pub struct ProviderRecord {
    pub service: String,
    pub provider: String,
    pub rating: Option<f64>,
    pub review_count: u64,
    pub price: Option<f64>,
    pub price_level: Option<u8>,
    pub currency: Option<String>,
    pub pricing_unit: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
    /// Input values that could not be read as their field's type.
    #[serde(skip)]
    pub rejected: Vec<RejectedValue>,
}

impl ProviderRecord {
    pub fn new(service: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            provider: provider.into(),
            rating: None,
            review_count: 0,
            price: None,
            price_level: None,
            currency: None,
            pricing_unit: None,
            link: None,
            notes: None,
            rejected: Vec::new(),
        }
    }

    pub fn with_rating(mut self, rating: f64, review_count: u64) -> Self {
        self.rating = Some(rating);
        self.review_count = review_count;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_price_level(mut self, level: u8) -> Self {
        self.price_level = Some(level);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedValue {
    pub field: &'static str,
    pub value: String,
}

/// Wire shape of a listing. Numeric fields are read loosely so one bad value
/// does not fail the whole file or API page.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub review_count: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub price_level: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub pricing_unit: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<RawListing> for ProviderRecord {
    fn from(raw: RawListing) -> Self {
        let mut rejected = Vec::new();
        let rating = read_number(&mut rejected, "rating", raw.rating, Some);
        let price = read_number(&mut rejected, "price", raw.price, Some);
        let review_count =
            read_number(&mut rejected, "review_count", raw.review_count, whole_number)
                .unwrap_or(0);
        let price_level = read_number(&mut rejected, "price_level", raw.price_level, |n| {
            whole_number(n).and_then(|level| u8::try_from(level).ok())
        });

        Self {
            service: raw.service,
            provider: raw.provider,
            rating,
            review_count,
            price,
            price_level,
            currency: raw.currency,
            pricing_unit: raw.pricing_unit,
            link: raw.link,
            notes: raw.notes,
            rejected,
        }
    }
}

/// Numbers and numeric strings are accepted; anything else is recorded in `rejected`.
fn read_number<T>(
    rejected: &mut Vec<RejectedValue>,
    field: &'static str,
    value: Option<Value>,
    convert: impl Fn(f64) -> Option<T>,
) -> Option<T> {
    let value = value?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .and_then(convert);

    if parsed.is_none() {
        rejected.push(RejectedValue {
            field,
            value: value.to_string(),
        });
    }
    parsed
}

fn whole_number(n: f64) -> Option<u64> {
    (n.is_finite() && n >= 0.0 && n.fract() == 0.0).then(|| n as u64)
}

/// Where an estimated price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum PriceBasis {
    Exact,
    /// Heuristic amount derived from a 0-4 price tier.
    Tier(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedPrice {
    pub amount: f64,
    pub currency: String,
    pub basis: PriceBasis,
}

impl EstimatedPrice {
    pub fn is_approximate(&self) -> bool {
        matches!(self.basis, PriceBasis::Tier(_))
    }
}

/// A normalized record with its estimated price attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedRecord {
    pub record: ProviderRecord,
    pub price: Option<EstimatedPrice>,
}

/// A priced record with its value-for-money score attached. Read-only from here on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProvider {
    #[serde(flatten)]
    pub record: ProviderRecord,
    pub estimated_price: Option<EstimatedPrice>,
    pub value_score: Option<f64>,
}

impl ScoredProvider {
    pub fn new(priced: PricedRecord, value_score: Option<f64>) -> Self {
        Self {
            record: priced.record,
            estimated_price: priced.price,
            value_score,
        }
    }

    pub fn provider(&self) -> &str {
        &self.record.provider
    }

    pub fn rating(&self) -> Option<f64> {
        self.record.rating
    }

    pub fn review_count(&self) -> u64 {
        self.record.review_count
    }

    pub fn price_amount(&self) -> Option<f64> {
        self.estimated_price.as_ref().map(|p| p.amount)
    }

    pub fn is_free(&self) -> bool {
        self.price_amount() == Some(0.0)
    }

    /// Neither a rating nor any price: only shown in the raw listing.
    pub fn is_rankable(&self) -> bool {
        self.rating().is_some() || self.estimated_price.is_some()
    }
}

/// A value dropped during normalization. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    BlankProvider { index: usize },
    InvalidField {
        provider: String,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProvider { index } => {
                write!(f, "listing #{} has no provider name and was skipped", index)
            }
            Self::InvalidField {
                provider,
                field,
                value,
            } => write!(f, "{}: ignored invalid {} '{}'", provider, field, value),
        }
    }
}
