pub mod algo;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod ops;

pub use catalog::{Catalog, CatalogItem};
pub use config::{BrowseConfig, Config, RecommenderConfig};
pub use engine::{Recommendation, Recommendations, Recommender};
pub use error::{CatalogError, ConfigError};
pub use model::SimilarityModel;
