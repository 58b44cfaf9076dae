//! Trail of positions flown in the current run, for path rendering.
//!
//! Sampling policy belongs to the display side: a point is appended only
//! when the drone has moved more than a minimum displacement since the last
//! one, which bounds memory at frame rate.

use std::collections::VecDeque;

use dronesim_core::constants::{MAX_TRAIL_POINTS, TRAIL_MIN_DISPLACEMENT_M};
use dronesim_core::enums::DroneStatus;
use dronesim_core::events::DroneEvent;
use dronesim_core::state::{DroneSnapshot, RouteView};
use dronesim_core::types::LatLng;
use dronesim_geo::haversine_distance;

#[derive(Debug, Clone)]
pub struct TrailRecorder {
    points: VecDeque<LatLng>,
    route: Option<RouteView>,
    min_displacement_m: f64,
    max_points: usize,
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new(TRAIL_MIN_DISPLACEMENT_M, MAX_TRAIL_POINTS)
    }
}

impl TrailRecorder {
    pub fn new(min_displacement_m: f64, max_points: usize) -> Self {
        Self {
            points: VecDeque::new(),
            route: None,
            min_displacement_m,
            max_points: max_points.max(1),
        }
    }

    /// Feed one snapshot. Returns true if a point was appended.
    pub fn observe(&mut self, snapshot: &DroneSnapshot) -> bool {
        let restarted = snapshot
            .events
            .iter()
            .any(|e| matches!(e, DroneEvent::RunReset | DroneEvent::RouteChanged { .. }));
        let idle_at_start = snapshot.status == DroneStatus::Idle && snapshot.progress == 0.0;
        if restarted || idle_at_start || self.route != Some(snapshot.route) {
            self.points.clear();
            self.route = Some(snapshot.route);
        }

        if !snapshot.controls.running && snapshot.progress <= 0.0 {
            return false;
        }

        let far_enough = self.points.back().map_or(true, |last| {
            haversine_distance(*last, snapshot.position) > self.min_displacement_m
        });
        if !far_enough {
            return false;
        }

        self.points.push_back(snapshot.position);
        if self.points.len() > self.max_points {
            self.points.pop_front();
        }
        true
    }

    pub fn points(&self) -> &VecDeque<LatLng> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronesim_core::types::Controls;
    use dronesim_geo::destination;

    fn origin() -> LatLng {
        LatLng::new(37.6568, 27.3660)
    }

    fn snap_at(meters: f64) -> DroneSnapshot {
        DroneSnapshot {
            status: DroneStatus::EnRoute,
            position: destination(origin(), 0.0, meters),
            progress: meters / 1000.0,
            distance_traveled_m: meters,
            controls: Controls {
                running: true,
                ..Default::default()
            },
            route: RouteView {
                start: origin(),
                end: destination(origin(), 0.0, 1000.0),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_samples_above_threshold_only() {
        let mut trail = TrailRecorder::default();
        assert!(trail.observe(&snap_at(0.5)));
        assert!(!trail.observe(&snap_at(3.0)));
        assert!(!trail.observe(&snap_at(5.4)));
        assert!(trail.observe(&snap_at(5.6)));
        assert!(trail.observe(&snap_at(20.0)));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn test_ignores_idle_and_clears_on_restart() {
        let mut trail = TrailRecorder::default();
        for m in [10.0, 20.0, 30.0] {
            trail.observe(&snap_at(m));
        }
        assert_eq!(trail.len(), 3);

        let idle = DroneSnapshot {
            status: DroneStatus::Idle,
            progress: 0.0,
            controls: Controls::default(),
            ..snap_at(0.0)
        };
        assert!(!trail.observe(&idle));
        assert!(trail.is_empty());

        for m in [10.0, 20.0] {
            trail.observe(&snap_at(m));
        }
        let mut reset = snap_at(0.1);
        reset.events.push(DroneEvent::RunReset);
        assert!(trail.observe(&reset));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_clears_on_new_route() {
        let mut trail = TrailRecorder::default();
        trail.observe(&snap_at(10.0));
        trail.observe(&snap_at(20.0));

        let mut other = snap_at(10.0);
        other.route.end = destination(origin(), 90.0, 1000.0);
        trail.observe(&other);
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_bounded_length() {
        let mut trail = TrailRecorder::new(5.0, 4);
        for i in 1..=10 {
            trail.observe(&snap_at(i as f64 * 10.0));
        }
        assert_eq!(trail.len(), 4);
        let first = *trail.points().front().unwrap();
        assert!((haversine_distance(origin(), first) - 70.0).abs() < 1e-6);
    }

    #[test]
    fn test_paused_mid_route_keeps_trail() {
        let mut trail = TrailRecorder::default();
        trail.observe(&snap_at(10.0));
        let mut paused = snap_at(40.0);
        paused.controls.running = false;
        assert!(trail.observe(&paused));
        assert_eq!(trail.len(), 2);
    }
}
