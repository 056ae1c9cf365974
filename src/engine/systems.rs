// ECS systems for the camera rig
// Two phases per tick:
//   Update - locomotion moves the subject, then the anchor snaps onto it
//   Late   - the orbit camera pans/zooms and looks at the subject
// Running the camera last means it always sees the subject's final position.

use bevy_ecs::prelude::*;

use super::camera::OrbitCamera;
use super::components::*;
use super::context::MouseContext;
use super::input::ControlFrame;
use super::locomotion::CharacterMotor;

/// Seconds elapsed since the previous tick
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

/// Entities the camera is wired to at setup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RigEntities {
    pub subject: Entity,
    pub anchor: Entity,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    Update,
    Late,
}

/// Walk/jump the player relative to the camera's azimuth.
/// Reads the azimuth the camera settled on last tick.
pub fn locomotion_system(
    dt: Res<DeltaTime>,
    frame: Res<ControlFrame>,
    camera: Res<OrbitCamera>,
    mut query: Query<(&mut Transform, &mut CharacterMotor), With<Player>>,
) {
    for (mut transform, mut motor) in query.iter_mut() {
        transform.position =
            motor.step(transform.position, &frame.keys, frame.jump, &*camera, dt.0);
        let facing = motor.facing;
        transform.face(facing);
    }
}

/// Move every anchor directly onto its target
pub fn follow_anchor_system(
    mut anchors: Query<(&mut Transform, &FollowAnchor)>,
    targets: Query<&Transform, Without<FollowAnchor>>,
) {
    for (mut transform, follow) in anchors.iter_mut() {
        match targets.get(follow.target) {
            Ok(target) => transform.position = target.position,
            Err(_) => log::error!("anchor target {:?} is gone", follow.target),
        }
    }
}

/// Late-phase camera update, gated by the mouse context.
pub fn orbit_camera_system(
    dt: Res<DeltaTime>,
    frame: Res<ControlFrame>,
    context: Res<MouseContext>,
    rig: Res<RigEntities>,
    mut camera: ResMut<OrbitCamera>,
    transforms: Query<&Transform>,
) {
    let (Ok(anchor), Ok(subject)) = (transforms.get(rig.anchor), transforms.get(rig.subject)) else {
        log::error!("camera rig lost its anchor or subject, skipping tick");
        return;
    };
    camera.update(&frame.camera, &*context, anchor.position, subject.position, dt.0);
}

pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.configure_sets((TickPhase::Update, TickPhase::Late).chain());
    schedule.add_systems(
        (locomotion_system, follow_anchor_system)
            .chain()
            .in_set(TickPhase::Update),
    );
    schedule.add_systems(orbit_camera_system.in_set(TickPhase::Late));
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn anchor_snaps_to_target() {
        let mut world = World::new();
        let target = world.spawn(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))).id();
        let anchor = world.spawn((Transform::default(), FollowAnchor { target })).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(follow_anchor_system);
        schedule.run(&mut world);

        let pos = world.get::<Transform>(anchor).map(|t| t.position);
        assert_eq!(pos, Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn anchor_with_missing_target_stays_put() {
        let mut world = World::new();
        let target = world.spawn(Transform::from_position(Vec3::ONE)).id();
        let anchor = world.spawn((Transform::default(), FollowAnchor { target })).id();
        world.despawn(target);

        let mut schedule = Schedule::default();
        schedule.add_systems(follow_anchor_system);
        schedule.run(&mut world);

        assert_eq!(world.get::<Transform>(anchor).map(|t| t.position), Some(Vec3::ZERO));
    }
}
