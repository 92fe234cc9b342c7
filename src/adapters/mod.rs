// Adapters layer: the listing sources the engine is fed from.

pub mod google_places;
pub mod json_file;
pub mod repository;

pub use google_places::{GooglePlacesSource, PlacesQuery};
pub use json_file::{JsonFileSource, SampleSource};
pub use repository::ServiceRepository;
