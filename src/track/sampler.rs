use chrono::{DateTime, Duration, Utc};

use crate::provider::{Location, PositionProvider, ProviderError};
use crate::track::{TrackConfig, TrackError, TrackPoint};

const NS_PER_MINUTE: f64 = 60e9;
const NS_PER_HOUR: f64 = 3600e9;

// Upper bound on the up-front allocation; longer tracks grow as they fill.
const MAX_PREALLOCATED: usize = 4096;

/// Resolved sampling window: `count` timestamps `start + k * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
    pub count: u64,
}

impl SampleWindow {
    pub fn around(center: DateTime<Utc>, config: &TrackConfig) -> Result<Self, TrackError> {
        let step = to_duration(config.interval_minutes, NS_PER_MINUTE, "interval_minutes")?;
        let half = to_duration(
            config.window_hours_each_side,
            NS_PER_HOUR,
            "window_hours_each_side",
        )?;

        let start = center
            .checked_sub_signed(half)
            .ok_or_else(|| out_of_range("window start"))?;
        let end = center
            .checked_add_signed(half)
            .ok_or_else(|| out_of_range("window end"))?;

        // floor(2 * window * 60 / interval) steps after the first sample.
        let steps = (2.0 * config.window_hours_each_side * 60.0 / config.interval_minutes).floor();
        if steps >= i64::MAX as f64 {
            return Err(out_of_range("sample count"));
        }
        let steps = steps as i64;

        let window = Self {
            start,
            end,
            step,
            count: steps as u64 + 1,
        };
        window.offset(steps)?;
        Ok(window)
    }

    fn offset(&self, k: i64) -> Result<DateTime<Utc>, TrackError> {
        self.step
            .num_nanoseconds()
            .and_then(|ns| ns.checked_mul(k))
            .and_then(|ns| self.start.checked_add_signed(Duration::nanoseconds(ns)))
            .ok_or_else(|| out_of_range("window end"))
    }

    /// Every sample timestamp in order. The last one has been range-checked
    /// by [`SampleWindow::around`], so no offset overflows.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (0..self.count as i64).map_while(move |k| self.offset(k).ok())
    }
}

/// Samples the provider across the configured window around `center`.
///
/// Fails without returning any points if a single sample fails.
pub fn sample<P: PositionProvider + ?Sized>(
    provider: &P,
    center: DateTime<Utc>,
    location: Location,
    config: &TrackConfig,
) -> Result<Vec<TrackPoint>, TrackError> {
    let window = SampleWindow::around(center, config)?;
    let capacity = window.count.min(MAX_PREALLOCATED as u64) as usize;
    let mut points = Vec::with_capacity(capacity);

    for timestamp in window.timestamps() {
        let point = sample_one(provider, timestamp, &location)
            .map_err(|source| TrackError::PositionComputationFailed { timestamp, source })?;
        points.push(point);
    }

    log::debug!(
        "sampled {} points from {} to {} every {}",
        points.len(),
        window.start,
        window.end,
        window.step
    );

    Ok(points)
}

fn sample_one<P: PositionProvider + ?Sized>(
    provider: &P,
    timestamp: DateTime<Utc>,
    location: &Location,
) -> Result<TrackPoint, ProviderError> {
    let position = provider.position_at(timestamp, location)?;

    let altitude = position.altitude_deg;
    let azimuth = position.azimuth_deg;
    if !altitude.is_finite() || !azimuth.is_finite() || !(-90.0..=90.0).contains(&altitude) {
        return Err(ProviderError::InvalidPosition {
            altitude_deg: altitude,
            azimuth_deg: azimuth,
        });
    }

    Ok(TrackPoint::new(timestamp, altitude, normalize_azimuth(azimuth)))
}

/// Folds an azimuth into `[0, 360)`.
pub fn normalize_azimuth(azimuth_deg: f64) -> f64 {
    let normalized = azimuth_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

fn to_duration(value: f64, ns_per_unit: f64, field: &str) -> Result<Duration, TrackError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackError::InvalidConfiguration(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    let ns = (value * ns_per_unit).round();
    if ns < 1.0 {
        return Err(TrackError::InvalidConfiguration(format!(
            "{field} is below one nanosecond"
        )));
    }
    if ns >= i64::MAX as f64 {
        return Err(out_of_range(field));
    }
    Ok(Duration::nanoseconds(ns as i64))
}

fn out_of_range(what: &str) -> TrackError {
    TrackError::InvalidConfiguration(format!("{what} is out of the supported time range"))
}
