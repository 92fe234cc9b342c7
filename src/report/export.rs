use crate::core::engine::Evaluation;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: usize,
    provider: &'a str,
    rating: Option<f64>,
    reviews: u64,
    price: Option<f64>,
    currency: Option<&'a str>,
    approximate: bool,
    value_score: Option<f64>,
    link: Option<&'a str>,
}

pub fn to_json(evaluation: &Evaluation) -> Result<String> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}

/// The detailed ranking as CSV, one row per provider. Absent values are empty cells.
pub fn to_csv(evaluation: &Evaluation) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (index, provider) in evaluation.summary.detailed.iter().enumerate() {
        let price = provider.estimated_price.as_ref();
        writer.serialize(RankingRow {
            rank: index + 1,
            provider: provider.provider(),
            rating: provider.rating(),
            reviews: provider.review_count(),
            price: price.map(|p| p.amount),
            currency: price.map(|p| p.currency.as_str()),
            approximate: price.is_some_and(|p| p.is_approximate()),
            value_score: provider.value_score,
            link: provider.record.link.as_deref(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
