// Third-person orbit camera
// See engine/orbit.rs for the spherical coordinate conventions.
//
// Camera model:
//   - The camera hangs off an anchor ("pivot") that follows the tracked subject
//   - Its offset from the pivot is (radius, polar, azimuth) on a sphere
//   - Mouse movement pans around the sphere, the wheel starts a zoom run
//   - After moving, the camera looks at the subject
//   - While a menu is open the camera does not update at all
//
// The azimuth doubles as the subject's facing reference: locomotion reads it
// through `AzimuthSource` to turn WASD into world-space directions.

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec2, Vec3};

use super::config::CameraConfig;
use super::context::ModeSource;
use super::orbit::OrbitState;
use super::zoom::{ZoomAnimator, ZoomDirection, ZoomLimits};

/// Per-tick camera input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// Raw pan axes: x turns around the subject, y tilts toward the poles.
    pub pan: Vec2,
    /// Scroll this tick; only the sign is used.
    pub scroll: f32,
}

/// Read-only access to the camera's rotation in the XZ plane.
pub trait AzimuthSource {
    fn azimuth(&self) -> f32;
}

#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    /// Private: radius and polar angle are kept in range by update(). Use orbit() to read.
    state: OrbitState,
    zoom: ZoomAnimator,

    /// Radians per unit of pan input per second
    pub pan_speed: f32,

    // Anchor position the offset is applied to, and the point looked at.
    pivot: Vec3,
    target: Vec3,
}

impl OrbitCamera {
    /// Starting radius is the length of `config.offset`, pulled into the zoom range.
    pub fn new(config: &CameraConfig) -> Self {
        let limits = ZoomLimits { min: config.min_zoom, max: config.max_zoom };
        let mut state = OrbitState::from_offset(config.offset_vec());
        if !limits.contains(state.radius) {
            let clamped = limits.clamp(state.radius);
            log::warn!(
                "initial camera distance {:.3} outside [{}, {}], using {:.3}",
                state.radius, limits.min, limits.max, clamped
            );
            state.radius = clamped;
        }

        Self {
            state,
            zoom: ZoomAnimator::new(config.zoom_distance, config.zoom_frames, limits, config.easing),
            pan_speed: config.pan_speed,
            pivot: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    /// Late-phase update. Call once per frame after the subject has moved.
    /// Returns false when the mode gate suspended the camera for this tick.
    pub fn update(
        &mut self,
        input: &CameraInput,
        gate: &impl ModeSource,
        pivot: Vec3,
        subject: Vec3,
        dt: f32,
    ) -> bool {
        // Still parented to the anchor while suspended; only the orbit freezes.
        self.pivot = pivot;

        if gate.current_mode().suspends_camera() {
            return false;
        }

        if let Some(direction) = ZoomDirection::from_scroll(input.scroll) {
            self.zoom.start(direction);
        }
        self.zoom.step(&mut self.state.radius);

        let delta = input.pan * self.pan_speed * dt;
        if delta.y != 0.0 {
            self.state.add_polar(delta.y);
        }
        if delta.x != 0.0 {
            self.state.add_azimuth(delta.x);
        }
        self.state.renormalize();

        self.target = subject;
        true
    }

    pub fn orbit(&self) -> &OrbitState { &self.state }
    pub fn radius(&self) -> f32 { self.state.radius }
    pub fn polar(&self) -> f32 { self.state.polar }
    pub fn zoom(&self) -> &ZoomAnimator { &self.zoom }
    pub fn pivot(&self) -> Vec3 { self.pivot }
    pub fn target(&self) -> Vec3 { self.target }

    /// Offset from the pivot, straight from the spherical coordinates.
    pub fn local_position(&self) -> Vec3 {
        self.state.local_offset()
    }

    /// World-space position of the camera eye.
    pub fn position(&self) -> Vec3 {
        self.pivot + self.local_position()
    }

    /// View matrix: looks from the camera eye toward the subject.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// World-space orientation of the camera (looks down its local -Z).
    pub fn rotation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix().inverse())
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    /// Zoom fraction in [0, 1]: 1 = fully zoomed in (min_zoom), 0 = fully zoomed out.
    pub fn zoom_fraction(&self) -> f32 {
        let limits = self.zoom.limits;
        let range = limits.max - limits.min;
        if range > 0.0 {
            1.0 - (self.state.radius - limits.min) / range
        } else {
            0.0
        }
    }
}

impl AzimuthSource for OrbitCamera {
    fn azimuth(&self) -> f32 {
        self.state.azimuth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::context::MouseMode;
    use crate::engine::orbit::{spherical_to_cartesian, INITIAL_POLAR, POLE_EPSILON};
    use crate::engine::zoom::EasingKind;
    use std::f32::consts::PI;

    fn config() -> CameraConfig {
        CameraConfig {
            pan_speed: 1.0,
            zoom_distance: 3.0,
            zoom_frames: 5,
            min_zoom: 1.0,
            max_zoom: 10.0,
            easing: EasingKind::Linear,
            offset: [0.0, 3.0, 4.0],
        }
    }

    fn pan(x: f32, y: f32) -> CameraInput {
        CameraInput { pan: Vec2::new(x, y), scroll: 0.0 }
    }

    #[test]
    fn radius_comes_from_offset_length() {
        let cam = OrbitCamera::new(&config());
        assert_eq!(cam.radius(), 5.0);
        assert_eq!(cam.polar(), INITIAL_POLAR);
        assert_eq!(cam.azimuth(), 0.0);
    }

    #[test]
    fn initial_radius_is_pulled_into_range() {
        let mut cfg = config();
        cfg.offset = [0.0, 0.0, 50.0];
        assert_eq!(OrbitCamera::new(&cfg).radius(), 10.0);
    }

    #[test]
    fn pan_is_scaled_by_speed_and_dt() {
        let mut cam = OrbitCamera::new(&config());
        cam.pan_speed = 2.0;
        cam.update(&pan(1.0, 0.5), &MouseMode::Normal, Vec3::ZERO, Vec3::ZERO, 0.1);
        assert!((cam.azimuth() - 0.2).abs() < 1e-6);
        assert!((cam.polar() - (INITIAL_POLAR + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn menu_mode_freezes_orbit() {
        let mut cam = OrbitCamera::new(&config());
        let before = *cam.orbit();
        let input = CameraInput { pan: Vec2::new(3.0, -2.0), scroll: 1.0 };
        let updated = cam.update(&input, &MouseMode::Menu, Vec3::ZERO, Vec3::ZERO, 0.5);
        assert!(!updated);
        assert_eq!(*cam.orbit(), before);
        assert!(!cam.zoom().is_active());
    }

    #[test]
    fn casting_mode_does_not_freeze() {
        let mut cam = OrbitCamera::new(&config());
        assert!(cam.update(&pan(1.0, 0.0), &MouseMode::Casting, Vec3::ZERO, Vec3::ZERO, 0.5));
        assert!(cam.azimuth() > 0.0);
    }

    #[test]
    fn polar_never_reaches_a_pole() {
        let mut cam = OrbitCamera::new(&config());
        for _ in 0..100 {
            cam.update(&pan(0.0, 5.0), &MouseMode::Normal, Vec3::ZERO, Vec3::ZERO, 0.1);
        }
        assert_eq!(cam.polar(), PI - POLE_EPSILON);
        for _ in 0..100 {
            cam.update(&pan(0.0, -5.0), &MouseMode::Normal, Vec3::ZERO, Vec3::ZERO, 0.1);
        }
        assert_eq!(cam.polar(), POLE_EPSILON);
    }

    #[test]
    fn azimuth_wraps_on_next_tick() {
        let mut cam = OrbitCamera::new(&config());
        cam.update(&pan(7.0, 0.0), &MouseMode::Normal, Vec3::ZERO, Vec3::ZERO, 1.0);
        assert!((cam.azimuth() - (7.0 - 2.0 * PI)).abs() < 1e-5);
    }

    #[test]
    fn position_follows_spherical_formula() {
        let mut cam = OrbitCamera::new(&config());
        let pivot = Vec3::new(2.0, 1.0, -3.0);
        let input = CameraInput { pan: Vec2::new(0.7, -0.2), scroll: -1.0 };
        for _ in 0..12 {
            cam.update(&input, &MouseMode::Normal, pivot, pivot, 0.1);
            let s = cam.orbit();
            let expected = pivot + spherical_to_cartesian(s.radius, s.polar, s.azimuth);
            assert!((cam.position() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn scroll_starts_zoom_and_steps_same_tick() {
        let mut cam = OrbitCamera::new(&config());
        let input = CameraInput { pan: Vec2::ZERO, scroll: -1.0 };
        cam.update(&input, &MouseMode::Normal, Vec3::ZERO, Vec3::ZERO, 0.016);
        assert!(cam.zoom().is_active());
        assert!((cam.radius() - 5.6).abs() < 1e-5);
    }

    #[test]
    fn looks_at_subject() {
        let mut cam = OrbitCamera::new(&config());
        let subject = Vec3::new(1.0, 0.0, 1.0);
        cam.update(&pan(0.4, 0.3), &MouseMode::Normal, subject, subject, 0.1);
        let to_subject = (subject - cam.position()).normalize();
        let facing = cam.rotation() * Vec3::NEG_Z;
        assert!(facing.dot(to_subject) > 0.999);
        assert!(cam.forward().dot(to_subject) > 0.999);
    }

    #[test]
    fn pivot_tracks_anchor_while_suspended() {
        let mut cam = OrbitCamera::new(&config());
        let anchor = Vec3::new(4.0, 0.0, 0.0);
        cam.update(&CameraInput::default(), &MouseMode::Menu, anchor, anchor, 0.1);
        assert_eq!(cam.pivot(), anchor);
        assert!((cam.position() - (anchor + cam.local_position())).length() < 1e-6);
    }

    #[test]
    fn zoom_fraction_spans_limits() {
        let mut cfg = config();
        cfg.offset = [0.0, 0.0, 1.0];
        assert_eq!(OrbitCamera::new(&cfg).zoom_fraction(), 1.0);
        cfg.offset = [0.0, 0.0, 10.0];
        assert_eq!(OrbitCamera::new(&cfg).zoom_fraction(), 0.0);
    }
}
