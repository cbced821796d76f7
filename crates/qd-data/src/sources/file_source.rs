use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use qd_core::Dataset;

use super::QuakeSource;
use crate::schema::parse_feature_collection;
use crate::DataError;

/// GeoJSON feature collection on the local filesystem
#[derive(Debug, Clone)]
pub struct GeoJsonFileSource {
    path: PathBuf,
    name: String,
}

impl GeoJsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuakeSource for GeoJsonFileSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        info!("Loading earthquakes from {}", self.name);
        let text = tokio::fs::read_to_string(&self.path).await?;

        // Parsing is CPU bound; keep it off the runtime's worker threads
        let dataset = tokio::task::spawn_blocking(move || parse_feature_collection(&text)).await??;

        if dataset.is_empty() {
            warn!("{} contains no earthquakes", self.name);
        } else {
            info!("Loaded {} earthquakes from {}", dataset.len(), self.name);
        }
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
