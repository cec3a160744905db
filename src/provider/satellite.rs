use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::parsing::parse_tle_lines;
use crate::provider::{Location, Position, PositionProvider, ProviderError};

// WGS-84
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const EARTH_ECCENTRICITY_SQ: f64 = 0.00669437999014;

/// Topocentric positions of an Earth-orbiting satellite, propagated with SGP4.
pub struct SatelliteProvider {
    elements: Elements,
    constants: Constants,
    observer_altitude_m: f64,
}

impl SatelliteProvider {
    pub fn from_tle(tle: &str) -> Result<Self, ProviderError> {
        let (name, line1, line2) = parse_tle_lines(tle)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
            observer_altitude_m: 0.0,
        })
    }

    pub fn with_observer_altitude(mut self, altitude_m: f64) -> Self {
        self.observer_altitude_m = altitude_m;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    fn observer_ecef_km(&self, location: &Location) -> [f64; 3] {
        let lat = location.lat_rad();
        let lon = location.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = EARTH_EQUATORIAL_RADIUS_KM
            / (1.0 - EARTH_ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let alt_km = self.observer_altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - EARTH_ECCENTRICITY_SQ) + alt_km) * sin_lat,
        ]
    }
}

impl PositionProvider for SatelliteProvider {
    fn position_at(
        &self,
        timestamp: DateTime<Utc>,
        location: &Location,
    ) -> Result<Position, ProviderError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| ProviderError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| ProviderError::Propagation(e.to_string()))?;

        let sidereal = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
            &timestamp.naive_utc(),
        ));

        let sat_ecef = teme_to_ecef_position(prediction.position, sidereal);
        let sta_ecef = self.observer_ecef_km(location);

        let dr = [
            sat_ecef[0] - sta_ecef[0],
            sat_ecef[1] - sta_ecef[1],
            sat_ecef[2] - sta_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

        let (east, north, up) = ecef_to_enu(dr, location.lat_rad(), location.lon_rad());
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
        let altitude_deg = if range_km > 0.0 {
            (up / range_km).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };

        Ok(Position {
            altitude_deg,
            azimuth_deg,
            distance_km: range_km,
            parallactic_angle_rad: parallactic_angle(
                altitude_deg.to_radians(),
                azimuth_deg.to_radians(),
                location.lat_rad(),
            ),
        })
    }
}

fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

/// Angle between the local vertical and the hour circle through the body.
/// Negative east of the meridian, positive west of it.
fn parallactic_angle(alt_rad: f64, az_rad: f64, lat_rad: f64) -> f64 {
    let y = -az_rad.sin() * lat_rad.cos();
    let x = lat_rad.sin() * alt_rad.cos() - lat_rad.cos() * alt_rad.sin() * az_rad.cos();
    y.atan2(x)
}
