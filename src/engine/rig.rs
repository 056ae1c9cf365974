// Frame driver for the camera rig.
// Owns the ECS world and schedule; the host calls tick() once per frame
// with that frame's input snapshot.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::camera::OrbitCamera;
use super::components::{FollowAnchor, Player, Transform};
use super::config::{CameraConfig, RigConfig};
use super::context::MouseContext;
use super::input::ControlFrame;
use super::locomotion::CharacterMotor;
use super::systems::{build_schedule, DeltaTime, RigEntities};
use crate::error::RigError;

pub struct Rig {
    world: World,
    schedule: Schedule,
    entities: RigEntities,
}

impl Rig {
    /// Spawn a player on the ground plane, an anchor following it, and wire
    /// the camera to both.
    pub fn new(config: &RigConfig) -> Result<Self, RigError> {
        config.validate()?;

        let mut world = World::new();
        let start = Vec3::new(0.0, config.movement.ground_height, 0.0);
        let subject = world
            .spawn((
                Transform::from_position(start),
                Player,
                CharacterMotor::new(&config.movement),
            ))
            .id();
        let anchor = world
            .spawn((Transform::from_position(start), FollowAnchor { target: subject }))
            .id();

        Self::from_world(world, subject, anchor, &config.camera)
    }

    /// Wire a camera to entities that already live in `world`.
    /// Both need a Transform; a MouseContext already in the world is kept.
    pub fn from_world(
        mut world: World,
        subject: Entity,
        anchor: Entity,
        camera: &CameraConfig,
    ) -> Result<Self, RigError> {
        if world.get::<Transform>(subject).is_none() {
            return Err(RigError::MissingCollaborator("subject"));
        }
        if world.get::<Transform>(anchor).is_none() {
            return Err(RigError::MissingCollaborator("anchor"));
        }

        let entities = RigEntities { subject, anchor };
        world.insert_resource(OrbitCamera::new(camera));
        world.insert_resource(entities);
        world.init_resource::<MouseContext>();
        world.init_resource::<ControlFrame>();
        world.init_resource::<DeltaTime>();

        log::info!(
            "camera rig ready: subject={:?} anchor={:?} zoom=[{}, {}] easing={:?}",
            subject, anchor, camera.min_zoom, camera.max_zoom, camera.easing
        );

        Ok(Self {
            world,
            schedule: build_schedule(),
            entities,
        })
    }

    /// Run one frame: Update phase, then Late phase.
    pub fn tick(&mut self, frame: ControlFrame, dt: f32) {
        self.world.insert_resource(frame);
        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);
    }

    pub fn camera(&self) -> &OrbitCamera {
        self.world.resource::<OrbitCamera>()
    }

    pub fn mouse_context(&self) -> &MouseContext {
        self.world.resource::<MouseContext>()
    }

    pub fn mouse_context_mut(&mut self) -> Mut<'_, MouseContext> {
        self.world.resource_mut::<MouseContext>()
    }

    pub fn subject(&self) -> Option<&Transform> {
        self.world.get::<Transform>(self.entities.subject)
    }

    pub fn anchor(&self) -> Option<&Transform> {
        self.world.get::<Transform>(self.entities.anchor)
    }

    pub fn entities(&self) -> RigEntities {
        self.entities
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
