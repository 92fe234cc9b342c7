use crate::domain::model::{ProviderRecord, RawListing};
use crate::domain::ports::ListingSource;
use crate::utils::error::{AppinionError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const PLACES_TEXTSEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/textsearch/json";

const DEFAULT_PROVIDER_NAME: &str = "Unnamed provider";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PlacesQuery {
    pub location: Option<String>,
    pub language: String,
    pub max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: Option<String>,
    rating: Option<Value>,
    user_ratings_total: Option<Value>,
    price_level: Option<Value>,
    place_id: Option<String>,
    formatted_address: Option<String>,
}

/// Listings from the Google Places Text Search API.
pub struct GooglePlacesSource {
    client: Client,
    endpoint: String,
    api_key: String,
    query: PlacesQuery,
    page_delay: Duration,
}

impl GooglePlacesSource {
    pub fn new(api_key: String, query: PlacesQuery) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: PLACES_TEXTSEARCH_URL.to_string(),
            api_key,
            query,
            page_delay: Duration::from_secs(2),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The API rejects a page token that is used too soon after it was issued.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    fn search_text(&self, service: &str) -> String {
        match &self.query.location {
            Some(location) if !location.trim().is_empty() => {
                format!("{} en {}", service, location.trim())
            }
            _ => service.to_string(),
        }
    }

    async fn fetch_page(&self, params: &[(&str, &str)]) -> Result<TextSearchResponse> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ListingSource for GooglePlacesSource {
    fn name(&self) -> &str {
        "Google Places"
    }

    async fn fetch(&self, service: &str) -> Result<Vec<ProviderRecord>> {
        let search = self.search_text(service);
        let mut records = Vec::new();
        let mut next_page_token: Option<String> = None;

        while records.len() < self.query.max_results {
            tracing::debug!("Requesting Places page (have {} results)", records.len());
            let page = {
                let mut params = vec![
                    ("key", self.api_key.as_str()),
                    ("language", self.query.language.as_str()),
                ];
                match next_page_token.as_deref() {
                    Some(token) => params.push(("pagetoken", token)),
                    None => params.push(("query", search.as_str())),
                }
                self.fetch_page(&params).await?
            };

            match page.status.as_str() {
                "OK" => {}
                "ZERO_RESULTS" => break,
                status => {
                    return Err(AppinionError::UpstreamError {
                        status: status.to_string(),
                        message: page
                            .error_message
                            .unwrap_or_else(|| status.to_string()),
                    })
                }
            }

            for place in page.results {
                if records.len() >= self.query.max_results {
                    break;
                }
                match place_to_record(service, place) {
                    Some(record) => records.push(record),
                    None => tracing::debug!("Skipping place without rating"),
                }
            }

            next_page_token = page.next_page_token;
            if next_page_token.is_none() {
                break;
            }
            tokio::time::sleep(self.page_delay).await;
        }

        Ok(records)
    }
}

/// Places without a rating are not comparable and are skipped. The price level is
/// kept as-is; turning it into an amount is the engine's job.
fn place_to_record(service: &str, place: Place) -> Option<ProviderRecord> {
    place.rating.as_ref()?;
    let notes = build_notes(&place);

    let raw = RawListing {
        service: service.to_string(),
        provider: place
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string()),
        rating: place.rating,
        review_count: place.user_ratings_total,
        price: None,
        price_level: place.price_level,
        currency: None,
        pricing_unit: None,
        link: place
            .place_id
            .map(|id| format!("https://www.google.com/maps/place/?q=place_id:{}", id)),
        notes,
    };
    Some(ProviderRecord::from(raw))
}

fn build_notes(place: &Place) -> Option<String> {
    let mut components = Vec::new();
    if let Some(address) = place.formatted_address.as_deref() {
        components.push(address.to_string());
    }
    if let Some(level) = &place.price_level {
        components.push(format!("Google price level: {}", level));
    }
    if components.is_empty() {
        None
    } else {
        Some(components.join(" · "))
    }
}
