mod cache;
mod error;
pub mod events;
mod projector;
pub mod sampler;
mod segmenter;
mod types;

use chrono::{DateTime, Utc};

pub use cache::{TrackCache, TrackKey};
pub use error::TrackError;
pub use events::{crossings, Crossing, CrossingKind, Events};
pub use projector::{project, project_angles, Vec3, DEFAULT_RADIUS};
pub use segmenter::{runs, segment, HorizonRun, Segments};
pub use types::{Track, TrackConfig, TrackConfigOverrides, TrackPoint};

use crate::provider::{Location, PositionProvider};

/// Samples the body around `center` and extracts its horizon events.
///
/// Unset fields of `overrides` take their defaults (10 minute cadence, 12
/// hours either side).
pub fn compute_track<P: PositionProvider + ?Sized>(
    provider: &P,
    center: DateTime<Utc>,
    location: Location,
    overrides: TrackConfigOverrides,
) -> Result<Track, TrackError> {
    compute_track_with(provider, center, location, &overrides.resolve())
}

pub fn compute_track_with<P: PositionProvider + ?Sized>(
    provider: &P,
    center: DateTime<Utc>,
    location: Location,
    config: &TrackConfig,
) -> Result<Track, TrackError> {
    let points = sampler::sample(provider, center, location, config)?;
    let Events { rise, set, transit } = events::detect(&points);

    log::debug!(
        "track around {}: rise {:?}, set {:?}, transit {:?}",
        center,
        rise.map(|p| p.timestamp()),
        set.map(|p| p.timestamp()),
        transit.map(|p| p.timestamp())
    );

    Ok(Track {
        points,
        rise_point: rise,
        set_point: set,
        transit_point: transit,
    })
}

impl Track {
    pub fn segments(&self) -> Segments {
        segment(&self.points)
    }

    /// All horizon crossings, not only the first rise and set.
    pub fn crossings(&self) -> Vec<Crossing> {
        crossings(&self.points)
    }
}
