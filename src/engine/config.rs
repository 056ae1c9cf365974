// Rig configuration with TOML support.
// Every section uses #[serde(default)] so a partial file (e.g. only
// overriding [camera]) keeps defaults for the rest.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::zoom::EasingKind;
use crate::error::RigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub camera: CameraConfig,
    pub movement: MovementConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// How fast the camera swings around the subject.
    pub pan_speed: f32,
    /// Distance covered by one scroll notch.
    pub zoom_distance: f32,
    /// Frame count N the easing laws divide by. Must be >= 1.
    pub zoom_frames: u32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub easing: EasingKind,
    /// Initial offset from the anchor. Only its length is used (starting zoom).
    pub offset: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 1.0,
            zoom_distance: 1.0,
            zoom_frames: 10,
            min_zoom: 0.01,
            max_zoom: 10.0,
            easing: EasingKind::Linear,
            offset: [0.0, 3.0, 5.0],
        }
    }
}

impl CameraConfig {
    pub fn offset_vec(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walk speed in world units per second
    pub speed: f32,
    pub jump_height: f32,
    /// Vertical acceleration, negative pulls down
    pub gravity: f32,
    /// Height of the ground plane the subject stands on
    pub ground_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            jump_height: 1.0,
            gravity: -9.81,
            ground_height: 0.0,
        }
    }
}

impl RigConfig {
    /// Load and validate a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded rig config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Setup-time sanity check. The camera itself assumes these hold.
    pub fn validate(&self) -> Result<(), RigError> {
        let cam = &self.camera;
        if cam.zoom_frames == 0 {
            return Err(RigError::InvalidConfig("zoom_frames must be at least 1".into()));
        }
        if !(cam.min_zoom > 0.0) {
            return Err(RigError::InvalidConfig(format!(
                "min_zoom must be positive, got {}",
                cam.min_zoom
            )));
        }
        if !(cam.max_zoom > cam.min_zoom) {
            return Err(RigError::InvalidConfig(format!(
                "max_zoom ({}) must exceed min_zoom ({})",
                cam.max_zoom, cam.min_zoom
            )));
        }
        if !(cam.zoom_distance > 0.0) {
            return Err(RigError::InvalidConfig(format!(
                "zoom_distance must be positive, got {}",
                cam.zoom_distance
            )));
        }
        if !cam.pan_speed.is_finite() || !self.movement.speed.is_finite() {
            return Err(RigError::InvalidConfig("speeds must be finite".into()));
        }
        if !(self.movement.gravity < 0.0) {
            return Err(RigError::InvalidConfig(format!(
                "gravity must pull down, got {}",
                self.movement.gravity
            )));
        }
        Ok(())
    }
}
