/// Startup parameters for the viewer
use serde::Deserialize;

use crate::error::ConfigError;
use crate::projection::{Camera, DepthAxis};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial viewport size in pixels, used where the surface has no size of its own
    pub viewport: ViewportConfig,
    pub focal: FocalConfig,
    /// World units moved per translation command
    pub translation_step: f64,
    /// Degrees turned per rotation command
    pub rotation_step_degrees: f64,
    pub depth_axis: DepthAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FocalConfig {
    pub initial: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            focal: FocalConfig::default(),
            translation_step: 50.0,
            rotation_step_degrees: 5.0,
            depth_axis: DepthAxis::Z,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

impl Default for FocalConfig {
    fn default() -> Self {
        Self {
            initial: 500.0,
            min: 100.0,
            max: 1000.0,
            step: 10.0,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera()?;
        for (name, value) in [
            ("focal step", self.focal.step),
            ("translation step", self.translation_step),
            ("rotation step", self.rotation_step_degrees),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveStep { name, value });
            }
        }
        let ViewportConfig { width, height } = self.viewport;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport { width, height });
        }
        Ok(())
    }

    /// Camera at the configured initial focal length. Fails on the same
    /// focal bounds that `validate` rejects.
    pub fn camera(&self) -> Result<Camera, ConfigError> {
        Camera::new(
            self.focal.initial,
            self.focal.min,
            self.focal.max,
            self.depth_axis,
        )
    }

    pub fn rotation_step_radians(&self) -> f64 {
        self.rotation_step_degrees.to_radians()
    }
}
