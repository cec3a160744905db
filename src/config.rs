use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::provider::Location;
use crate::track::{TrackConfig, DEFAULT_RADIUS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub observer: ObserverConfig,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub render: RenderConfig,
    pub satellite: SatelliteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObserverConfig {
    pub name: Option<String>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

impl ObserverConfig {
    pub fn location(&self) -> Location {
        Location::new(self.latitude_deg, self.longitude_deg)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SatelliteConfig {
    File { tle_file: PathBuf },
    Inline { tle: String },
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        // Relative TLE paths resolve against the config file.
        if let SatelliteConfig::File { tle_file } = &mut config.satellite {
            if tle_file.is_relative() {
                if let Some(dir) = Path::new(path).parent() {
                    *tle_file = dir.join(&*tle_file);
                }
            }
        }
        Ok(config)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let obs = &self.observer;
        if !(-90.0..=90.0).contains(&obs.latitude_deg) {
            return Err(ConfigError::Invalid(format!(
                "latitude_deg {} outside [-90, 90]",
                obs.latitude_deg
            )));
        }
        if !(-180.0..=180.0).contains(&obs.longitude_deg) {
            return Err(ConfigError::Invalid(format!(
                "longitude_deg {} outside [-180, 180]",
                obs.longitude_deg
            )));
        }
        if !(self.render.radius.is_finite() && self.render.radius > 0.0) {
            return Err(ConfigError::Invalid("render.radius must be positive".into()));
        }
        Ok(())
    }

    pub fn tle(&self) -> Result<String, ConfigError> {
        match &self.satellite {
            SatelliteConfig::File { tle_file } => Ok(std::fs::read_to_string(tle_file)?),
            SatelliteConfig::Inline { tle } => Ok(tle.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_str(
            r#"
observer:
  latitude_deg: 40.4168
  longitude_deg: -3.7038
satellite:
  tle_file: iss.tle
"#,
        )
        .unwrap();

        assert_eq!(config.track, TrackConfig::default());
        assert_eq!(config.render.radius, DEFAULT_RADIUS);
        assert_eq!(config.observer.altitude_m, 0.0);
        assert_eq!(config.observer.location(), Location::new(40.4168, -3.7038));
        assert!(matches!(config.satellite, SatelliteConfig::File { .. }));
    }

    #[test]
    fn full_config() {
        let config = Config::from_str(
            r#"
observer:
  name: Madrid
  latitude_deg: 40.4
  longitude_deg: -3.7
  altitude_m: 650
track:
  interval_minutes: 5
render:
  radius: 10
satellite:
  tle: |
    1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
    2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
"#,
        )
        .unwrap();

        assert_eq!(config.track.interval_minutes, 5.0);
        assert_eq!(config.track.window_hours_each_side, 12.0);
        assert_eq!(config.render.radius, 10.0);
        assert_eq!(config.observer.name.as_deref(), Some("Madrid"));
        assert_eq!(config.tle().unwrap().lines().count(), 2);
    }

    #[test]
    fn rejects_out_of_range_observer() {
        let err = Config::from_str(
            r#"
observer: { latitude_deg: 95.0, longitude_deg: 0.0 }
satellite: { tle: "x" }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_satellite_is_a_parse_error() {
        let err = Config::from_str("observer: { latitude_deg: 0, longitude_deg: 0 }").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
