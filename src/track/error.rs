use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("position computation failed at {timestamp}: {source}")]
    PositionComputationFailed {
        timestamp: DateTime<Utc>,
        #[source]
        source: ProviderError,
    },
}
