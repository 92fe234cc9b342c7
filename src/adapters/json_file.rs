use crate::adapters::repository::ServiceRepository;
use crate::domain::model::ProviderRecord;
use crate::domain::ports::ListingSource;
use crate::utils::error::{AppinionError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const SAMPLE_DATA: &str = include_str!("../../data/services.json");

pub fn parse_listings(content: &str) -> Result<Vec<ProviderRecord>> {
    Ok(serde_json::from_str(content)?)
}

fn lookup(repository: &ServiceRepository, service: &str) -> Result<Vec<ProviderRecord>> {
    let found = repository.for_service(service);
    if found.is_empty() {
        return Err(AppinionError::ServiceNotFound {
            service: service.to_string(),
            available: repository.services(),
        });
    }
    Ok(found)
}

/// Listings read from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> Result<ServiceRepository> {
        tracing::debug!("Reading listings from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(ServiceRepository::new(parse_listings(&content)?))
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    fn name(&self) -> &str {
        "data file"
    }

    async fn fetch(&self, service: &str) -> Result<Vec<ProviderRecord>> {
        let repository = self.load().await?;
        lookup(&repository, service)
    }
}

/// The example data set bundled with the binary.
#[derive(Debug, Clone)]
pub struct SampleSource {
    repository: ServiceRepository,
}

impl SampleSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            repository: ServiceRepository::new(parse_listings(SAMPLE_DATA)?),
        })
    }

    pub fn services(&self) -> Vec<String> {
        self.repository.services()
    }
}

#[async_trait]
impl ListingSource for SampleSource {
    fn name(&self) -> &str {
        "sample data"
    }

    async fn fetch(&self, service: &str) -> Result<Vec<ProviderRecord>> {
        lookup(&self.repository, service)
    }
}
