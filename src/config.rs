use crate::error::{Result, ViewError};
use crate::math::is_positive;
use serde::{Deserialize, Serialize};

/// The colours used to draw the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub road: String,
    pub car: String,
    /// Roadwork colour in the "on" half of the blink cycle.
    pub roadwork_on: String,
    /// Roadwork colour in the "off" half of the blink cycle.
    pub roadwork_off: String,
    pub chart_line: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#000000".into(),
            road: "#ffffff".into(),
            car: "#ffffff".into(),
            roadwork_on: "#ffff00".into(),
            roadwork_off: "#aaaa00".into(),
            chart_line: "#ffff00".into(),
        }
    }
}

/// Client settings. Missing fields take their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The exponent step of one wheel notch; a notch zooms by `exp(±zoom_step)`.
    pub zoom_step: f64,
    /// The scale applied when the world is first shown.
    pub fit_scale: f64,
    /// The initial top-left inset as a fraction of the canvas size.
    pub fit_margin: f64,
    /// The length of each half of the roadwork blink cycle, in ms.
    pub blink_period_ms: u64,
    /// The number of samples kept for the chart.
    pub metrics_capacity: usize,
    /// The vehicle count requested when none is given.
    pub default_cars: u32,
    /// Congestion percentages above this are flagged.
    pub congestion_warn_pct: f64,
    /// How long the roadwork acknowledgement stays visible, in ms.
    pub flash_ms: u64,
    /// Road stroke width in screen pixels.
    pub road_width_px: f64,
    /// Side length of a roadwork marker in screen pixels.
    pub roadwork_size_px: f64,
    /// Traffic light radius in screen pixels.
    pub light_radius_px: f64,
    /// Car radius in screen pixels.
    pub car_radius_px: f64,
    pub palette: Palette,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.1,
            fit_scale: 0.95,
            fit_margin: 0.025,
            blink_period_ms: 400,
            metrics_capacity: 40,
            default_cars: 600,
            congestion_warn_pct: 25.0,
            flash_ms: 1000,
            road_width_px: 0.8,
            roadwork_size_px: 10.0,
            light_radius_px: 3.0,
            car_radius_px: 2.5,
            palette: Palette::default(),
        }
    }
}

impl ClientConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is within its valid range.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.zoom_step) {
            return Err(ViewError::InvalidConfig("zoom_step must be positive"));
        }
        if !is_positive(self.fit_scale) {
            return Err(ViewError::InvalidConfig("fit_scale must be positive"));
        }
        if !self.fit_margin.is_finite() {
            return Err(ViewError::InvalidConfig("fit_margin must be finite"));
        }
        if self.blink_period_ms == 0 {
            return Err(ViewError::InvalidConfig("blink_period_ms must be positive"));
        }
        if self.metrics_capacity == 0 {
            return Err(ViewError::InvalidConfig("metrics_capacity must be positive"));
        }
        let sizes = [
            self.road_width_px,
            self.roadwork_size_px,
            self.light_radius_px,
            self.car_radius_px,
        ];
        if !sizes.into_iter().all(is_positive) {
            return Err(ViewError::InvalidConfig("marker sizes must be positive"));
        }
        Ok(())
    }
}
