use serde::{Deserialize, Serialize};

/// Observer position on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Location {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Horizontal coordinates of a body as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub altitude_deg: f64,
    /// Measured from north, clockwise.
    pub azimuth_deg: f64,
    pub distance_km: f64,
    pub parallactic_angle_rad: f64,
}
