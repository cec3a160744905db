//! Renderer-facing geometry built from a [`Track`].
//!
//! Geometry is rebuilt whole for every track; a scene holding a previous
//! [`TrackGeometry`] replaces it rather than patching it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

use crate::track::{project, runs, Track, TrackPoint, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LineStyle {
    /// Above the horizon.
    Solid,
    /// Below the horizon.
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub style: LineStyle,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub vertices: Vec<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerKind {
    Rise,
    Set,
    Transit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub timestamp: DateTime<Utc>,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub direction: Cardinal,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackGeometry {
    pub radius: f64,
    pub polylines: Vec<Polyline>,
    pub markers: Vec<Marker>,
}

impl TrackGeometry {
    pub fn from_track(track: &Track, radius: f64) -> Self {
        let polylines = runs(track.points())
            .map(|run| Polyline {
                style: if run.above_horizon {
                    LineStyle::Solid
                } else {
                    LineStyle::Dashed
                },
                start: run.points[0].timestamp(),
                end: run.points[run.points.len() - 1].timestamp(),
                vertices: run.points.iter().map(|p| project(p, radius)).collect(),
            })
            .collect();

        let markers = [
            (MarkerKind::Rise, track.rise_point()),
            (MarkerKind::Transit, track.transit_point()),
            (MarkerKind::Set, track.set_point()),
        ]
        .into_iter()
        .filter_map(|(kind, point)| point.map(|p| marker(kind, p, radius)))
        .collect();

        Self {
            radius,
            polylines,
            markers,
        }
    }
}

fn marker(kind: MarkerKind, point: &TrackPoint, radius: f64) -> Marker {
    Marker {
        kind,
        timestamp: point.timestamp(),
        altitude_deg: point.altitude_deg(),
        azimuth_deg: point.azimuth_deg(),
        direction: cardinal_direction(point.azimuth_deg()),
        position: project(point, radius),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const CARDINALS: [Cardinal; 8] = [
    Cardinal::N,
    Cardinal::NE,
    Cardinal::E,
    Cardinal::SE,
    Cardinal::S,
    Cardinal::SW,
    Cardinal::W,
    Cardinal::NW,
];

/// Nearest of the eight compass points to an azimuth in degrees.
pub fn cardinal_direction(azimuth_deg: f64) -> Cardinal {
    let sector = (azimuth_deg.rem_euclid(360.0) / 45.0).round() as usize % 8;
    CARDINALS[sector]
}
