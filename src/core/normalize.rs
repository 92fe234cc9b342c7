use crate::core::price::TIER_COUNT;
use crate::domain::model::{DataWarning, ProviderRecord};

pub const MAX_RATING: f64 = 5.0;

/// Clean raw listings before pricing.
///
/// Invalid values become `None` and are reported as warnings; nothing here fails.
pub fn normalize(
    raw: Vec<ProviderRecord>,
    target_currency: &str,
) -> (Vec<ProviderRecord>, Vec<DataWarning>) {
    let mut records = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (index, mut record) in raw.into_iter().enumerate() {
        record.provider = record.provider.trim().to_string();
        if record.provider.is_empty() {
            warnings.push(DataWarning::BlankProvider { index });
            continue;
        }

        for rejected in std::mem::take(&mut record.rejected) {
            warnings.push(DataWarning::InvalidField {
                provider: record.provider.clone(),
                field: rejected.field,
                value: rejected.value,
            });
        }

        if let Some(rating) = record.rating {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                warnings.push(invalid(&record, "rating", rating));
                record.rating = None;
            }
        }

        if let Some(price) = record.price {
            if !price.is_finite() || price < 0.0 {
                warnings.push(invalid(&record, "price", price));
                record.price = None;
            }
        }

        if let Some(level) = record.price_level {
            if usize::from(level) >= TIER_COUNT {
                warnings.push(invalid(&record, "price_level", level));
                record.price_level = None;
            }
        }

        record.currency = Some(
            non_blank(record.currency.take())
                .unwrap_or_else(|| target_currency.to_string())
                .to_uppercase(),
        );
        record.pricing_unit = non_blank(record.pricing_unit.take());
        record.link = non_blank(record.link.take());
        record.notes = non_blank(record.notes.take());

        records.push(record);
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    (records, warnings)
}

fn invalid(record: &ProviderRecord, field: &'static str, value: impl ToString) -> DataWarning {
    DataWarning::InvalidField {
        provider: record.provider.clone(),
        field,
        value: value.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
