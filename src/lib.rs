pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use crate::config::{Settings, SourceKind};
pub use crate::core::comparison::Comparison;
pub use crate::core::engine::{Evaluation, RankingEngine};
pub use crate::core::ranker::{Criterion, Ranker, Ranking};
pub use crate::core::summary::{Summary, SummarySelector};
pub use crate::domain::model::{ProviderRecord, ScoredProvider};
pub use crate::utils::error::{AppinionError, Result};
