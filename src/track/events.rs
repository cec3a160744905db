//! Horizon events over an already-sampled track.
//!
//! Reported instants are samples, not interpolated crossings, so their
//! precision is bounded by the sampling interval.

use serde::Serialize;
use strum_macros::Display;

use crate::track::TrackPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Events {
    pub rise: Option<TrackPoint>,
    pub set: Option<TrackPoint>,
    pub transit: Option<TrackPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CrossingKind {
    Rise,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crossing {
    pub kind: CrossingKind,
    pub point: TrackPoint,
}

/// Scans `points` once for the first rise, the first set and the culmination.
///
/// A rise reports the first above-horizon sample, a set the last one before
/// the body drops. The culmination is the highest above-horizon sample, the
/// earliest one on ties.
pub fn detect(points: &[TrackPoint]) -> Events {
    let mut events = Events::default();

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            let prev = &points[i - 1];
            if events.rise.is_none() && !prev.is_above_horizon() && point.is_above_horizon() {
                events.rise = Some(*point);
            }
            if events.set.is_none() && prev.is_above_horizon() && !point.is_above_horizon() {
                events.set = Some(*prev);
            }
        }

        if point.is_above_horizon() {
            let higher = events
                .transit
                .map_or(true, |best| point.altitude_deg() > best.altitude_deg());
            if higher {
                events.transit = Some(*point);
            }
        }
    }

    events
}

/// Every horizon crossing in order. Rises report the sample after the
/// crossing, sets the sample before it, as in [`detect`].
pub fn crossings(points: &[TrackPoint]) -> Vec<Crossing> {
    points
        .windows(2)
        .filter_map(|w| match (w[0].is_above_horizon(), w[1].is_above_horizon()) {
            (false, true) => Some(Crossing {
                kind: CrossingKind::Rise,
                point: w[1],
            }),
            (true, false) => Some(Crossing {
                kind: CrossingKind::Set,
                point: w[0],
            }),
            _ => None,
        })
        .collect()
}
