use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERVAL_MINUTES: f64 = 10.0;
pub const DEFAULT_WINDOW_HOURS: f64 = 12.0;

/// One sample of the body's apparent position.
///
/// `above_horizon` is derived from the altitude at construction and cannot be
/// set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    timestamp: DateTime<Utc>,
    altitude_deg: f64,
    azimuth_deg: f64,
    above_horizon: bool,
}

impl TrackPoint {
    pub fn new(timestamp: DateTime<Utc>, altitude_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            timestamp,
            altitude_deg,
            azimuth_deg,
            above_horizon: altitude_deg > 0.0,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude_deg
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn is_above_horizon(&self) -> bool {
        self.above_horizon
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: f64,
    #[serde(default = "default_window_hours")]
    pub window_hours_each_side: f64,
}

fn default_interval_minutes() -> f64 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_window_hours() -> f64 {
    DEFAULT_WINDOW_HOURS
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            window_hours_each_side: DEFAULT_WINDOW_HOURS,
        }
    }
}

/// Partial configuration; unset fields fall back to [`TrackConfig::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct TrackConfigOverrides {
    pub interval_minutes: Option<f64>,
    pub window_hours_each_side: Option<f64>,
}

impl TrackConfigOverrides {
    pub fn resolve(&self) -> TrackConfig {
        self.apply_to(TrackConfig::default())
    }

    pub fn apply_to(&self, base: TrackConfig) -> TrackConfig {
        TrackConfig {
            interval_minutes: self.interval_minutes.unwrap_or(base.interval_minutes),
            window_hours_each_side: self
                .window_hours_each_side
                .unwrap_or(base.window_hours_each_side),
        }
    }
}

impl From<TrackConfig> for TrackConfigOverrides {
    fn from(config: TrackConfig) -> Self {
        Self {
            interval_minutes: Some(config.interval_minutes),
            window_hours_each_side: Some(config.window_hours_each_side),
        }
    }
}

/// A sampled trajectory with its rise, set and culmination samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub(crate) points: Vec<TrackPoint>,
    pub(crate) rise_point: Option<TrackPoint>,
    pub(crate) set_point: Option<TrackPoint>,
    pub(crate) transit_point: Option<TrackPoint>,
}

impl Track {
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn rise_point(&self) -> Option<&TrackPoint> {
        self.rise_point.as_ref()
    }

    pub fn set_point(&self) -> Option<&TrackPoint> {
        self.set_point.as_ref()
    }

    pub fn transit_point(&self) -> Option<&TrackPoint> {
        self.transit_point.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn above_horizon_is_strictly_positive_altitude() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(TrackPoint::new(t, 0.01, 10.0).is_above_horizon());
        assert!(!TrackPoint::new(t, 0.0, 10.0).is_above_horizon());
        assert!(!TrackPoint::new(t, -0.0, 10.0).is_above_horizon());
        assert!(!TrackPoint::new(t, -12.0, 10.0).is_above_horizon());
    }

    #[test]
    fn overrides_fill_from_defaults() {
        let config = TrackConfigOverrides {
            interval_minutes: Some(5.0),
            window_hours_each_side: None,
        }
        .resolve();
        assert_eq!(config.interval_minutes, 5.0);
        assert_eq!(config.window_hours_each_side, DEFAULT_WINDOW_HOURS);

        assert_eq!(TrackConfigOverrides::default().resolve(), TrackConfig::default());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: TrackConfig = serde_yaml::from_str("interval_minutes: 2.5").unwrap();
        assert_eq!(config.interval_minutes, 2.5);
        assert_eq!(config.window_hours_each_side, 12.0);
    }
}
