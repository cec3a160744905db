//! Sampled sky tracks of an orbiting body for a ground observer: rise, set
//! and culmination over a time window, plus geometry for a 3D sky dome.

pub mod config;
pub mod provider;
pub mod render;
pub mod track;

pub use provider::{Location, Position, PositionProvider, ProviderError, SatelliteProvider};
pub use track::{
    compute_track, compute_track_with, project, segment, Track, TrackCache, TrackConfig,
    TrackConfigOverrides, TrackError, TrackPoint,
};
