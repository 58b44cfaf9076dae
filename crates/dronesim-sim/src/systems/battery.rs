//! Battery model: charge is a pure function of ground distance.

use dronesim_core::constants::BATTERY_FULL_PCT;

/// Remaining charge after `distance_m` of ground travel, in [0, 100].
pub fn battery_pct(distance_m: f64, consumption_pct_per_km: f64) -> f64 {
    (BATTERY_FULL_PCT - distance_m / 1000.0 * consumption_pct_per_km).clamp(0.0, BATTERY_FULL_PCT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronesim_core::enums::DroneHealth;

    #[test]
    fn test_full_at_start() {
        assert_eq!(battery_pct(0.0, 2.0), 100.0);
    }

    #[test]
    fn test_two_percent_per_km() {
        assert!((battery_pct(1000.0, 2.0) - 98.0).abs() < 1e-12);
        assert!((battery_pct(37_500.0, 2.0) - 25.0).abs() < 1e-12);
        assert_eq!(DroneHealth::from_battery(battery_pct(37_500.0, 2.0)), DroneHealth::Warning);
        assert_eq!(DroneHealth::from_battery(battery_pct(42_500.0, 2.0)), DroneHealth::Critical);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(battery_pct(80_000.0, 2.0), 0.0);
    }

    #[test]
    fn test_monotonic_in_distance() {
        let mut last = battery_pct(0.0, 2.0);
        for i in 1..=600 {
            let pct = battery_pct(i as f64 * 100.0, 2.0);
            assert!(pct <= last, "battery rose at {} m", i * 100);
            last = pct;
        }
    }
}
