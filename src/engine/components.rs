// ECS components for the camera rig
// The subject carries Transform + Player + CharacterMotor,
// the anchor carries Transform + FollowAnchor.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

/// Position and facing of an entity in 3D space
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    /// Turn so local -Z points along `direction` (projected onto XZ).
    pub fn face(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if let Some(dir) = flat.try_normalize() {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, dir);
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Marks the tracked subject the camera orbits and locomotion drives.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Copies the target entity's position every Update phase.
/// The camera's spherical offset is applied relative to this entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowAnchor {
    pub target: Entity,
}
