use crate::core::engine::Evaluation;
use crate::core::summary::DetailMode;
use crate::domain::model::ScoredProvider;

pub const APPROXIMATE_PRICE_LABEL: &str = "approx. (Google-tier level)";

pub fn format_currency(amount: f64, currency: Option<&str>) -> String {
    let Some(code) = currency.filter(|c| !c.is_empty()) else {
        return format!("{:.2}", amount);
    };
    let code = code.to_uppercase();
    let symbol = match code.as_str() {
        "EUR" => "€",
        "USD" | "MXN" | "COP" => "$",
        other => other,
    };
    format!("{:.2} {}", amount, symbol)
}

pub fn describe_price(provider: &ScoredProvider) -> Option<String> {
    let price = provider.estimated_price.as_ref()?;
    let base = format_currency(price.amount, Some(&price.currency));
    let unit = if price.is_approximate() {
        Some(APPROXIMATE_PRICE_LABEL)
    } else {
        provider.record.pricing_unit.as_deref()
    };
    Some(match unit {
        Some(unit) => format!("{} {}", base, unit),
        None => base,
    })
}

fn describe_rating(provider: &ScoredProvider) -> String {
    match provider.rating() {
        Some(rating) => format!("{:.1} ⭐", rating),
        None => "n/a".to_string(),
    }
}

pub fn render_summary(evaluation: &Evaluation) -> String {
    let summary = &evaluation.summary;
    if summary.is_degenerate() {
        return "No options found for this service.".to_string();
    }

    let mut lines = vec!["Quick summary:".to_string()];
    if let Some(best) = &summary.best_rated {
        let price_part = describe_price(best)
            .map(|p| format!(" for {}", p))
            .unwrap_or_default();
        lines.push(format!(
            "  ⭐ Best rated: {} - {} ({} reviews){}",
            best.provider(),
            describe_rating(best),
            best.review_count(),
            price_part
        ));
    }
    if let Some(cheap) = &summary.cheapest {
        let price_part = describe_price(cheap)
            .map(|p| format!(" - {}", p))
            .unwrap_or_default();
        lines.push(format!(
            "  💰 Cheapest: {}{} with {}",
            cheap.provider(),
            price_part,
            describe_rating(cheap)
        ));
    }
    if let Some(value) = &summary.best_value {
        let price_part = describe_price(value)
            .map(|p| format!(" for {}", p))
            .unwrap_or_default();
        lines.push(format!(
            "  ⚖️ Best value: {} - {}{}",
            value.provider(),
            describe_rating(value),
            price_part
        ));
    }

    lines.join("\n")
}

pub fn render_ranking(evaluation: &Evaluation) -> String {
    let summary = &evaluation.summary;
    if summary.detailed.is_empty() {
        return String::new();
    }

    let heading = match summary.detail_mode {
        DetailMode::Value => "Detailed ranking (by value for money):",
        DetailMode::Rating => "Detailed ranking (by rating, no prices available):",
        DetailMode::InputOrder => "Listings (no ratings available, shown as listed):",
    };
    let mut lines = vec![format!("\n{}", heading)];

    for (index, provider) in summary.detailed.iter().enumerate() {
        let price_text = describe_price(provider).unwrap_or_else(|| "Price not available".to_string());
        lines.push(format!(
            "  {}. {}: {} ({} reviews) - {}",
            index + 1,
            provider.provider(),
            describe_rating(provider),
            provider.review_count(),
            price_text
        ));
        if let Some(notes) = &provider.record.notes {
            lines.push(format!("     Note: {}", notes));
        }
        if let Some(link) = &provider.record.link {
            lines.push(format!("     Link: {}", link));
        }
    }

    lines.join("\n")
}

pub fn render_report(evaluation: &Evaluation) -> String {
    let service = evaluation
        .listings
        .first()
        .map(|p| p.record.service.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(evaluation.service.as_str());
    let mut out = format!("Comparison for: {}\n\n", service);
    out.push_str(&render_summary(evaluation));
    let ranking = render_ranking(evaluation);
    if !ranking.is_empty() {
        out.push('\n');
        out.push_str(&ranking);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::RankingEngine;
    use crate::core::price::{PriceEstimator, TierTable};
    use crate::core::value::ValueScorer;
    use crate::domain::model::ProviderRecord;

    fn evaluate(records: Vec<ProviderRecord>) -> Evaluation {
        let tiers = TierTable::new(&[5.0, 15.0, 30.0, 60.0, 100.0]).unwrap();
        RankingEngine::new(PriceEstimator::new(tiers), ValueScorer::default(), "EUR", 5)
            .unwrap()
            .evaluate("plumbing", records)
            .unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12.5, Some("EUR")), "12.50 €");
        assert_eq!(format_currency(12.5, Some("usd")), "12.50 $");
        assert_eq!(format_currency(12.5, Some("GBP")), "12.50 GBP");
        assert_eq!(format_currency(12.5, None), "12.50");
    }

    #[test]
    fn test_tier_price_is_marked_approximate() {
        let evaluation = evaluate(vec![
            ProviderRecord::new("plumbing", "AquaFix").with_rating(4.7, 41).with_price_level(2),
        ]);
        let text = render_report(&evaluation);

        assert!(text.contains("30.00 € approx. (Google-tier level)"));
        assert!(text.contains("⚖️ Best value: AquaFix"));
    }

    #[test]
    fn test_missing_rating_is_not_rendered_as_zero() {
        let evaluation = evaluate(vec![
            ProviderRecord::new("plumbing", "Unrated").with_price(20.0),
        ]);
        let text = render_report(&evaluation);

        assert!(text.contains("Unrated: n/a (0 reviews) - 20.00 €"));
        assert!(text.contains("shown as listed"));
        assert!(!text.contains("0.0 ⭐"));
    }

    #[test]
    fn test_heading_uses_listed_service_name() {
        let evaluation = evaluate(vec![
            ProviderRecord::new("Fontanería", "AquaFix").with_rating(4.7, 41),
        ]);
        assert!(render_report(&evaluation).starts_with("Comparison for: Fontanería\n"));
    }

    #[test]
    fn test_degenerate_report() {
        let evaluation = evaluate(vec![]);
        assert_eq!(
            render_report(&evaluation),
            "Comparison for: plumbing\n\nNo options found for this service."
        );
    }
}
