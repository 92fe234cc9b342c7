pub mod comparison;
pub mod engine;
pub mod normalize;
pub mod price;
pub mod ranker;
pub mod summary;
pub mod value;

pub use crate::domain::model::{
    DataWarning, EstimatedPrice, PriceBasis, PricedRecord, ProviderRecord, ScoredProvider,
};
pub use crate::domain::ports::{EngineSettings, ListingSource};
pub use crate::utils::error::Result;
