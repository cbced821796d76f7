pub mod file_source;

use async_trait::async_trait;

use qd_core::Dataset;

use crate::DataError;

pub use file_source::GeoJsonFileSource;

/// Something a dataset can be loaded from
#[async_trait]
pub trait QuakeSource: Send + Sync {
    /// Load and validate the whole dataset
    async fn load(&self) -> Result<Dataset, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
