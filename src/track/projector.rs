use serde::Serialize;

use crate::track::TrackPoint;

/// Radius of the sky dome the track is drawn on.
pub const DEFAULT_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Places a track point on a sphere of `radius`.
///
/// North is `+z`, the zenith `+y`, and east `-x` so that east sits on the
/// right of a viewer looking north.
pub fn project(point: &TrackPoint, radius: f64) -> Vec3 {
    project_angles(point.altitude_deg(), point.azimuth_deg(), radius)
}

pub fn project_angles(altitude_deg: f64, azimuth_deg: f64, radius: f64) -> Vec3 {
    let alt = altitude_deg.to_radians();
    let az = azimuth_deg.to_radians();
    Vec3 {
        x: -radius * alt.cos() * az.sin(),
        y: radius * alt.sin(),
        z: radius * alt.cos() * az.cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS
    }

    #[test]
    fn cardinal_points_on_horizon() {
        let r = DEFAULT_RADIUS;
        let north = project_angles(0.0, 0.0, r);
        let east = project_angles(0.0, 90.0, r);
        let south = project_angles(0.0, 180.0, r);
        let west = project_angles(0.0, 270.0, r);
        assert!(close(north, Vec3 { x: 0.0, y: 0.0, z: r }));
        assert!(close(east, Vec3 { x: -r, y: 0.0, z: 0.0 }));
        assert!(close(south, Vec3 { x: 0.0, y: 0.0, z: -r }));
        assert!(close(west, Vec3 { x: r, y: 0.0, z: 0.0 }));
    }

    #[test]
    fn zenith_ignores_azimuth() {
        for az in [0.0, 45.0, 133.0, 359.9] {
            let v = project_angles(90.0, az, 2.5);
            assert!(v.x.abs() < EPS && v.z.abs() < EPS);
            assert!((v.y - 2.5).abs() < EPS);
        }
    }

    #[test]
    fn stays_on_sphere_and_is_deterministic() {
        let a = project_angles(23.4, 211.0, 7.0);
        let b = project_angles(23.4, 211.0, 7.0);
        assert_eq!(a, b);
        let norm = (a.x * a.x + a.y * a.y + a.z * a.z).sqrt();
        assert!((norm - 7.0).abs() < EPS);
    }

    #[test]
    fn below_horizon_is_negative_y() {
        assert!(project_angles(-10.0, 45.0, 1.0).y < 0.0);
    }
}
