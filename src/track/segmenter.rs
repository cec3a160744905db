use serde::Serialize;

use crate::track::TrackPoint;

/// A maximal stretch of consecutive samples on the same side of the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonRun<'a> {
    pub above_horizon: bool,
    pub points: &'a [TrackPoint],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segments {
    pub above_runs: Vec<Vec<TrackPoint>>,
    pub below_runs: Vec<Vec<TrackPoint>>,
}

/// Iterates the horizon runs of `points` in temporal order.
pub fn runs(points: &[TrackPoint]) -> impl Iterator<Item = HorizonRun<'_>> {
    let mut rest = points;
    std::iter::from_fn(move || {
        let first = rest.first()?;
        let above = first.is_above_horizon();
        let len = rest
            .iter()
            .position(|p| p.is_above_horizon() != above)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(len);
        rest = tail;
        Some(HorizonRun {
            above_horizon: above,
            points: run,
        })
    })
}

/// Partitions `points` into above- and below-horizon runs, each list in
/// temporal order. Single-sample runs are kept.
pub fn segment(points: &[TrackPoint]) -> Segments {
    let mut segments = Segments::default();
    for run in runs(points) {
        let target = if run.above_horizon {
            &mut segments.above_runs
        } else {
            &mut segments.below_runs
        };
        target.push(run.points.to_vec());
    }
    segments
}

impl Segments {
    /// Rebuilds the original sequence. Runs alternate, so only the state of
    /// the first run is needed to restore the order.
    pub fn interleave(&self, starts_above: bool) -> Vec<TrackPoint> {
        let mut above = self.above_runs.iter();
        let mut below = self.below_runs.iter();
        let mut take_above = starts_above;
        let mut out = Vec::new();

        loop {
            let next = if take_above { above.next() } else { below.next() };
            match next {
                Some(run) => out.extend_from_slice(run),
                None => {
                    // The other list may still hold exactly one trailing run.
                    let other = if take_above { below.next() } else { above.next() };
                    if let Some(run) = other {
                        out.extend_from_slice(run);
                    }
                    break;
                }
            }
            take_above = !take_above;
        }

        out
    }
}
