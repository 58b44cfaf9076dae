//! Runtime configuration for the `dronesim` binary.
//!
//! Every field is optional in the JSON file; missing fields fall back to the
//! demo route and the engine defaults.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use dronesim_core::constants::FRAME_RATE;
use dronesim_core::state::RouteView;
use dronesim_core::types::LatLng;
use dronesim_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub route: RouteView,
    /// Live loop frame rate (Hz).
    pub frame_rate_hz: u32,
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            route: RouteView {
                start: LatLng::new(37.6568, 27.3660),
                end: LatLng::new(37.6605, 27.3725),
            },
            frame_rate_hz: FRAME_RATE,
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate_hz == 0 || self.frame_rate_hz > 1000 {
            bail!("frame_rate_hz must be in 1..=1000, got {}", self.frame_rate_hz);
        }
        self.sim.validate().context("invalid sim config")?;
        self.route.start.validate().context("invalid route start")?;
        self.route.end.validate().context("invalid route end")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"sim":{"target_speed_kmh":40.0}}"#).unwrap();
        assert_eq!(config.sim.target_speed_kmh, 40.0);
        assert_eq!(config.sim.acceleration_mps2, SimConfig::default().acceleration_mps2);
        assert_eq!(config.route, AppConfig::default().route);
        assert_eq!(config.frame_rate_hz, FRAME_RATE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_route_override() {
        let config: AppConfig = serde_json::from_str(
            r#"{"route":{"start":{"lat":41.0,"lng":29.0},"end":{"lat":41.01,"lng":29.02}}}"#,
        )
        .unwrap();
        assert_eq!(config.route.start, LatLng::new(41.0, 29.0));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.frame_rate_hz = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sim.max_frame_dt_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sim.acceleration_mps2 = -2.5;
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("acceleration_mps2"));

        let mut config = AppConfig::default();
        config.route.end = LatLng::new(0.0, 200.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/dronesim.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dronesim.json"));
    }
}
