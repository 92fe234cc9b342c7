use crate::domain::model::ScoredProvider;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Rating,
    Price,
    Value,
}

impl Criterion {
    fn key(self, provider: &ScoredProvider) -> Option<f64> {
        match self {
            Criterion::Rating => provider.rating(),
            Criterion::Price => provider.price_amount(),
            Criterion::Value => provider.value_score,
        }
    }
}

/// An ordered view over a provider slice. Iterating it again yields the same order.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    entries: Vec<&'a ScoredProvider>,
}

impl<'a> Ranking<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a ScoredProvider> + '_ {
        self.entries.iter().copied()
    }

    pub fn head(&self) -> Option<&'a ScoredProvider> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'r, 'a> IntoIterator for &'r Ranking<'a> {
    type Item = &'a ScoredProvider;
    type IntoIter = std::iter::Copied<std::slice::Iter<'r, &'a ScoredProvider>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

pub struct Ranker;

impl Ranker {
    /// Sort `providers` by `criterion`. Providers without the key are left out.
    ///
    /// Rating and value sort descending, price ascending. On equal value a free
    /// service comes first. Remaining ties fall back to review count (rating and
    /// value only), then the provider name ignoring case. The sort is
    /// stable, so anything still tied keeps its input order.
    pub fn rank(providers: &[ScoredProvider], criterion: Criterion) -> Ranking<'_> {
        let mut keyed: Vec<(f64, &ScoredProvider)> = providers
            .iter()
            .filter_map(|p| criterion.key(p).map(|k| (k, p)))
            .collect();

        keyed.sort_by(|(ka, a), (kb, b)| {
            let primary = match criterion {
                Criterion::Price => ka.total_cmp(kb),
                Criterion::Rating | Criterion::Value => kb.total_cmp(ka),
            };
            let free_first = match criterion {
                Criterion::Value => b.is_free().cmp(&a.is_free()),
                Criterion::Rating | Criterion::Price => Ordering::Equal,
            };
            let reviews = match criterion {
                Criterion::Price => Ordering::Equal,
                Criterion::Rating | Criterion::Value => b.review_count().cmp(&a.review_count()),
            };
            primary
                .then(free_first)
                .then(reviews)
                .then_with(|| compare_names(a.provider(), b.provider()))
        });

        Ranking {
            entries: keyed.into_iter().map(|(_, p)| p).collect(),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EstimatedPrice, PriceBasis, ProviderRecord};

    fn provider(name: &str, rating: Option<f64>, reviews: u64, price: Option<f64>) -> ScoredProvider {
        let mut record = ProviderRecord::new("cleaning", name);
        record.rating = rating;
        record.review_count = reviews;
        let estimated_price = price.map(|amount| EstimatedPrice {
            amount,
            currency: "EUR".to_string(),
            basis: PriceBasis::Exact,
        });
        let value_score = match (rating, price) {
            (Some(r), Some(p)) if p > 0.0 => Some(r / p),
            _ => None,
        };
        ScoredProvider {
            record,
            estimated_price,
            value_score,
        }
    }

    fn names(ranking: &Ranking<'_>) -> Vec<String> {
        ranking.iter().map(|p| p.provider().to_string()).collect()
    }

    #[test]
    fn test_rating_ranking_descending_with_review_tiebreak() {
        let providers = vec![
            provider("Alpha", Some(4.5), 10, None),
            provider("Bravo", Some(4.8), 5, None),
            provider("Charlie", Some(4.5), 50, None),
        ];

        let ranking = Ranker::rank(&providers, Criterion::Rating);
        assert_eq!(names(&ranking), vec!["Bravo", "Charlie", "Alpha"]);
    }

    #[test]
    fn test_name_tiebreak_is_case_insensitive() {
        let providers = vec![
            provider("delta", Some(4.0), 10, None),
            provider("Bravo", Some(4.0), 10, None),
            provider("alpha", Some(4.0), 10, None),
        ];

        let ranking = Ranker::rank(&providers, Criterion::Rating);
        assert_eq!(names(&ranking), vec!["alpha", "Bravo", "delta"]);
    }

    #[test]
    fn test_price_ranking_ascending_ignores_reviews() {
        let providers = vec![
            provider("Zeta", Some(3.0), 500, Some(20.0)),
            provider("Eta", Some(3.0), 1, Some(20.0)),
            provider("Theta", Some(5.0), 0, Some(10.0)),
            provider("Iota", Some(5.0), 0, None),
        ];

        let ranking = Ranker::rank(&providers, Criterion::Price);
        assert_eq!(names(&ranking), vec!["Theta", "Eta", "Zeta"]);
    }

    #[test]
    fn test_free_service_wins_value_tie_at_zero_rating() {
        let mut free = provider("Zed Free", Some(0.0), 0, Some(0.0));
        free.value_score = Some(0.0);
        let providers = vec![provider("Ace Paid", Some(0.0), 5, Some(10.0)), free];

        let ranking = Ranker::rank(&providers, Criterion::Value);
        assert_eq!(names(&ranking), vec!["Zed Free", "Ace Paid"]);
    }

    #[test]
    fn test_missing_keys_are_excluded() {
        let providers = vec![
            provider("Rated", Some(4.0), 1, None),
            provider("Priced", None, 0, Some(10.0)),
            provider("Both", Some(3.0), 1, Some(30.0)),
        ];

        assert_eq!(Ranker::rank(&providers, Criterion::Rating).len(), 2);
        assert_eq!(Ranker::rank(&providers, Criterion::Price).len(), 2);
        assert_eq!(
            names(&Ranker::rank(&providers, Criterion::Value)),
            vec!["Both"]
        );
    }

    #[test]
    fn test_ranking_is_restartable_and_idempotent() {
        let providers = vec![
            provider("Alpha", Some(4.7), 3, Some(40.0)),
            provider("beta", Some(4.2), 3, Some(15.0)),
            provider("Gamma", Some(4.2), 3, Some(15.0)),
        ];

        let first = Ranker::rank(&providers, Criterion::Value);
        let second = Ranker::rank(&providers, Criterion::Value);

        assert_eq!(names(&first), names(&second));
        let again: Vec<String> = (&first).into_iter().map(|p| p.provider().to_string()).collect();
        assert_eq!(names(&first), again);
        assert_eq!(names(&first), vec!["beta", "Gamma", "Alpha"]);
    }
}
