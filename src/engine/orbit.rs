// Spherical orbit state for the third-person camera.
//
// Coordinates:
//   - radius: distance from the pivot (zoom)
//   - polar (phi): angle from the +Y axis, clamped away from both poles
//   - azimuth (theta): rotation in the XZ plane, theta = 0 points along +Z
//
// The camera's local offset is always derived from these three values;
// nothing stores a separate position that could drift.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Distance kept between the polar angle and either pole.
/// Stops the look direction from flipping when the camera passes overhead.
pub const POLE_EPSILON: f32 = 0.0001;

/// Polar angle a freshly placed camera starts at.
pub const INITIAL_POLAR: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl OrbitState {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            polar: INITIAL_POLAR,
            azimuth: 0.0,
        }
    }

    /// Radius taken from the length of a designer-placed offset.
    pub fn from_offset(offset: Vec3) -> Self {
        Self::new(offset.length())
    }

    /// Move the polar angle, stopping at the pole margin instead of wrapping.
    pub fn add_polar(&mut self, delta: f32) {
        self.polar = (self.polar + delta).clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    /// Azimuth accumulates freely here; `renormalize` pulls it back once per tick.
    pub fn add_azimuth(&mut self, delta: f32) {
        self.azimuth += delta;
    }

    /// Lazy wrap of the azimuth: at most one full turn is removed per call.
    /// Negative azimuths are left alone.
    pub fn renormalize(&mut self) {
        if self.azimuth > TAU {
            self.azimuth -= TAU;
        }
    }

    /// Offset from the pivot to the camera eye.
    pub fn local_offset(&self) -> Vec3 {
        spherical_to_cartesian(self.radius, self.polar, self.azimuth)
    }
}

pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    Vec3::new(
        azimuth.sin() * polar.sin() * radius,
        polar.cos() * radius,
        azimuth.cos() * polar.sin() * radius,
    )
}
