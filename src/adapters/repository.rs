use crate::domain::model::ProviderRecord;
use std::collections::{BTreeSet, HashMap};

/// Listings grouped by service name, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ServiceRepository {
    options: Vec<ProviderRecord>,
    index: HashMap<String, Vec<usize>>,
}

impl ServiceRepository {
    pub fn new(options: Vec<ProviderRecord>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, option) in options.iter().enumerate() {
            index
                .entry(normalize_service_name(&option.service))
                .or_default()
                .push(position);
        }
        Self { options, index }
    }

    /// Distinct service names, sorted.
    pub fn services(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.service.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Listings for `service` in file order.
    pub fn for_service(&self, service: &str) -> Vec<ProviderRecord> {
        self.index
            .get(&normalize_service_name(service))
            .map(|positions| positions.iter().map(|&i| self.options[i].clone()).collect())
            .unwrap_or_default()
    }
}

fn normalize_service_name(service: &str) -> String {
    service.trim().to_lowercase()
}
