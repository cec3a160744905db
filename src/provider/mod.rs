mod error;
mod parsing;
mod satellite;
mod types;

use chrono::{DateTime, Utc};

pub use error::ProviderError;
pub use parsing::parse_tle_lines;
pub use satellite::SatelliteProvider;
pub use types::{Location, Position};

/// Source of topocentric positions for a single body.
///
/// Implementations must be side-effect free: the sampler calls them once per
/// timestamp and never caches within a run.
pub trait PositionProvider {
    fn position_at(
        &self,
        timestamp: DateTime<Utc>,
        location: &Location,
    ) -> Result<Position, ProviderError>;
}

impl<F> PositionProvider for F
where
    F: Fn(DateTime<Utc>, &Location) -> Result<Position, ProviderError>,
{
    fn position_at(
        &self,
        timestamp: DateTime<Utc>,
        location: &Location,
    ) -> Result<Position, ProviderError> {
        self(timestamp, location)
    }
}
