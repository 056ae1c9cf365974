// Camera-relative character locomotion.
//
// Directions on the XZ plane come from the orbit camera's azimuth, so "forward"
// always points away from the camera:
//   forward: (-sin θ, 0, -cos θ)
//   right:   (-cos θ, 0,  sin θ)
//
// The motor adds jumping and gravity. There is no physics engine: the ground
// is a flat plane at `ground_height`.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::camera::AzimuthSource;
use super::config::MovementConfig;

/// Movement keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// +1 forward, -1 backward, 0 otherwise. Forward wins when both are held.
    pub fn forward_axis(&self) -> f32 {
        if self.forward {
            1.0
        } else if self.backward {
            -1.0
        } else {
            0.0
        }
    }
}

pub fn forward_vector(azimuth: f32, keys: &MoveKeys) -> Vec3 {
    Vec3::new(-azimuth.sin(), 0.0, -azimuth.cos()) * keys.forward_axis()
}

/// Right takes priority when both strafe keys are held.
pub fn strafe_vector(azimuth: f32, keys: &MoveKeys) -> Vec3 {
    if keys.right {
        Vec3::new(-azimuth.cos(), 0.0, azimuth.sin())
    } else if keys.left {
        Vec3::new(azimuth.cos(), 0.0, -azimuth.sin())
    } else {
        Vec3::ZERO
    }
}

/// Unit move direction, or None when nothing (or nothing net) is held.
pub fn move_direction(azimuth: f32, keys: &MoveKeys) -> Option<Vec3> {
    let combined = forward_vector(azimuth, keys) + strafe_vector(azimuth, keys);
    combined.try_normalize()
}

/// Walk/jump state of the tracked subject.
#[derive(Component, Debug, Clone)]
pub struct CharacterMotor {
    pub speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub ground_height: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Last non-zero move direction; the subject faces this way.
    pub facing: Vec3,
}

impl CharacterMotor {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            speed: config.speed,
            jump_height: config.jump_height,
            gravity: config.gravity,
            ground_height: config.ground_height,
            vertical_velocity: 0.0,
            grounded: true,
            facing: Vec3::NEG_Z,
        }
    }

    /// Advance one tick and return the new position.
    pub fn step(
        &mut self,
        position: Vec3,
        keys: &MoveKeys,
        jump: bool,
        camera: &impl AzimuthSource,
        dt: f32,
    ) -> Vec3 {
        let mut position = position;

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
        }

        if let Some(dir) = move_direction(camera.azimuth(), keys) {
            position += dir * dt * self.speed;
            self.facing = dir;
        }

        if jump && self.grounded {
            self.vertical_velocity += (self.jump_height * -3.0 * self.gravity).sqrt();
            log::trace!("jump v={:.3}", self.vertical_velocity);
        }

        self.vertical_velocity += self.gravity * dt;
        position.y += self.vertical_velocity * dt;

        self.grounded = position.y <= self.ground_height;
        if self.grounded {
            position.y = self.ground_height;
        }
        position
    }
}
