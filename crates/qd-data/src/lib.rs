//! Dataset loading for the earthquake dashboard
//!
//! A dataset is read once at startup from a GeoJSON feature collection. Any
//! failure aborts the whole load; there is no partial recovery.

pub mod config;
pub mod schema;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{load_settings, settings_path, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use schema::{parse_feature_collection, quake_from_feature};
pub use sources::{GeoJsonFileSource, QuakeSource};

/// Errors that can occur while loading a dataset or settings
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(Box<geojson::Error>),

    #[error("Expected a FeatureCollection, found {0}")]
    NotFeatureCollection(&'static str),

    #[error("Feature {feature} is missing {field}")]
    MissingField { feature: String, field: &'static str },

    #[error("Feature {feature} has invalid geometry: {reason}")]
    InvalidGeometry { feature: String, reason: String },

    #[error("Duplicate quake id: {0}")]
    DuplicateId(String),

    #[error("Invalid settings: {0}")]
    Config(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<geojson::Error> for DataError {
    fn from(error: geojson::Error) -> Self {
        DataError::GeoJson(Box::new(error))
    }
}
