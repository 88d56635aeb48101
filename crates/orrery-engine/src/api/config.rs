use serde::Deserialize;

use crate::core::integrator::Calibration;
use crate::texture::TextureConfig;

/// Engine configuration. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub calibration: Calibration,
    /// Time scale at startup (default: 10).
    pub default_time_scale: f64,
    pub min_time_scale: f64,
    pub max_time_scale: f64,
    /// Frame deltas above this are clamped (seconds, default: 0.1).
    /// `null` turns the clamp off.
    pub max_frame_dt: Option<f64>,
    pub textures: TextureConfig,
    /// Flattening tolerance for guide meshes, in world units.
    pub guide_tolerance: f32,
    /// Maximum number of render instances (default: 1024).
    pub max_instances: usize,
    /// Whether orbit guides are drawn at startup.
    pub show_orbits: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            default_time_scale: 10.0,
            min_time_scale: 1.0,
            max_time_scale: 1000.0,
            max_frame_dt: Some(0.1),
            textures: TextureConfig::default(),
            guide_tolerance: 0.01,
            max_instances: 1024,
            show_orbits: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp a raw frame delta into [0, max_frame_dt]. Garbage becomes 0.
    pub fn clamp_dt(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        match self.max_frame_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }
}
