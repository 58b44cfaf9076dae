//! Great-circle geometry on a spherical Earth.
//!
//! Points are converted to unit vectors (x toward lat 0/lng 0, z toward the
//! north pole) and interpolated with spherical linear interpolation, so every
//! intermediate point lies on the great circle through both endpoints.

use glam::DVec3;

use dronesim_core::constants::{EARTH_RADIUS_M, MIN_PATH_LENGTH_M};
use dronesim_core::types::LatLng;

/// Below this central angle (radians) two points are treated as identical.
const DEGENERATE_ANGLE: f64 = 1e-15;

/// Great-circle distance between two coordinates in meters (haversine).
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

/// Initial bearing from `a` toward `b` in degrees (0 = North, clockwise, [0, 360)).
pub fn initial_bearing(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Point reached by traveling `distance_m` from `origin` on the given initial bearing.
pub fn destination(origin: LatLng, bearing_deg: f64, distance_m: f64) -> LatLng {
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    LatLng::new(lat2.to_degrees(), normalize_lng(lng2.to_degrees()))
}

/// A fixed two-point great-circle route with its length cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLine {
    start: LatLng,
    end: LatLng,
    /// Path length in meters, never below `MIN_PATH_LENGTH_M`.
    length_m: f64,
    start_unit: DVec3,
    end_unit: DVec3,
    /// Central angle between the endpoints (radians).
    angle: f64,
}

impl GeoLine {
    /// Build a route between two coordinates. A zero-length route is allowed.
    pub fn new(start: LatLng, end: LatLng) -> Self {
        let start_unit = to_unit(start);
        let end_unit = to_unit(end);
        let angle = start_unit
            .cross(end_unit)
            .length()
            .atan2(start_unit.dot(end_unit));

        Self {
            start,
            end,
            length_m: haversine_distance(start, end).max(MIN_PATH_LENGTH_M),
            start_unit,
            end_unit,
            angle,
        }
    }

    pub fn start(&self) -> LatLng {
        self.start
    }

    pub fn end(&self) -> LatLng {
        self.end
    }

    /// Route length in meters (always positive).
    pub fn length(&self) -> f64 {
        self.length_m
    }

    /// Whether the endpoints coincide and the length is only the clamped floor.
    pub fn is_degenerate(&self) -> bool {
        self.angle <= DEGENERATE_ANGLE
    }

    /// Coordinate `meters` along the route. Out-of-range input clamps to the endpoints.
    pub fn point_at_distance(&self, meters: f64) -> LatLng {
        if meters.is_nan() || meters <= 0.0 {
            return self.start;
        }
        if meters >= self.length_m {
            return self.end;
        }
        if self.is_degenerate() {
            return self.start;
        }

        let t = meters / self.length_m;
        let sin_angle = self.angle.sin();
        let w_start = ((1.0 - t) * self.angle).sin() / sin_angle;
        let w_end = (t * self.angle).sin() / sin_angle;
        from_unit(self.start_unit * w_start + self.end_unit * w_end)
    }
}

fn to_unit(p: LatLng) -> DVec3 {
    let lat = p.lat.to_radians();
    let lng = p.lng.to_radians();
    DVec3::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
}

fn from_unit(v: DVec3) -> LatLng {
    let v = v.normalize();
    LatLng::new(
        v.z.clamp(-1.0, 1.0).asin().to_degrees(),
        v.y.atan2(v.x).to_degrees(),
    )
}

fn normalize_lng(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_route() -> GeoLine {
        GeoLine::new(LatLng::new(37.6568, 27.3660), LatLng::new(37.6605, 27.3725))
    }

    #[test]
    fn test_one_degree_at_equator() {
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6, "1 degree lng at equator: {d} vs {expected}");

        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - expected).abs() < 1e-6, "1 degree lat: {d} vs {expected}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLng::new(37.6568, 27.3660);
        let b = LatLng::new(37.6605, 27.3725);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_demo_route_length() {
        // ~410 m north, ~572 m east at 37.66N.
        let len = demo_route().length();
        assert!(len > 650.0 && len < 750.0, "demo route length {len}");
    }

    #[test]
    fn test_destination_matches_distance() {
        let origin = LatLng::new(37.6568, 27.3660);
        for bearing in [0.0, 45.0, 90.0, 200.0, 315.0] {
            let p = destination(origin, bearing, 1000.0);
            let d = haversine_distance(origin, p);
            assert!((d - 1000.0).abs() < 1e-6, "bearing {bearing}: {d}");
            let back = initial_bearing(origin, p);
            let diff = (back - bearing + 180.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 1e-6, "bearing {bearing} vs {back}");
        }
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let p = destination(LatLng::new(0.0, 179.99), 90.0, 5_000.0);
        assert!(p.lng < -179.0, "wrapped lng {}", p.lng);
    }

    #[test]
    fn test_endpoints_and_clamping() {
        let line = demo_route();
        assert_eq!(line.point_at_distance(0.0), line.start());
        assert_eq!(line.point_at_distance(-10.0), line.start());
        assert_eq!(line.point_at_distance(f64::NAN), line.start());
        assert_eq!(line.point_at_distance(line.length()), line.end());
        assert_eq!(line.point_at_distance(line.length() + 50.0), line.end());
    }

    #[test]
    fn test_point_at_distance_lies_on_route() {
        let line = demo_route();
        let total = line.length();
        for meters in [1.0, 100.0, total / 2.0, total - 1.0] {
            let p = line.point_at_distance(meters);
            let from_start = haversine_distance(line.start(), p);
            let to_end = haversine_distance(p, line.end());
            assert!((from_start - meters).abs() < 1e-3, "{meters}: from start {from_start}");
            assert!(
                (from_start + to_end - total).abs() < 1e-3,
                "{meters}: off the great circle by {}",
                from_start + to_end - total
            );
        }
    }

    #[test]
    fn test_point_at_distance_is_monotonic() {
        let line = GeoLine::new(LatLng::new(10.0, 20.0), LatLng::new(12.0, 23.0));
        let mut last_to_end = f64::INFINITY;
        let steps = 200;
        for i in 0..=steps {
            let meters = line.length() * i as f64 / steps as f64;
            let to_end = haversine_distance(line.point_at_distance(meters), line.end());
            assert!(to_end <= last_to_end + 1e-6, "step {i}: {to_end} > {last_to_end}");
            last_to_end = to_end;
        }
        assert!(last_to_end < 1e-6);
    }

    #[test]
    fn test_degenerate_route() {
        let p = LatLng::new(37.6568, 27.3660);
        let line = GeoLine::new(p, p);
        assert!(line.is_degenerate());
        assert_eq!(line.length(), MIN_PATH_LENGTH_M);
        assert_eq!(line.point_at_distance(0.0), p);
        assert_eq!(line.point_at_distance(1.0), p);
        assert!(!demo_route().is_degenerate());
    }
}
