// Engine module - third-person camera rig
// Orbit camera, zoom animation, mouse context gate and camera-relative locomotion,
// wired together as bevy_ecs systems.

pub mod camera;
pub mod components;
pub mod config;
pub mod context;
pub mod input;
pub mod locomotion;
pub mod orbit;
pub mod rig;
pub mod systems;
pub mod zoom;

// Re-export commonly used items
pub use camera::{AzimuthSource, CameraInput, OrbitCamera};
pub use components::*;
pub use config::{CameraConfig, MovementConfig, RigConfig};
pub use context::{ModeSource, MouseContext, MouseMode};
pub use input::{ControlFrame, InputState};
pub use locomotion::{CharacterMotor, MoveKeys};
pub use orbit::OrbitState;
pub use rig::Rig;
pub use zoom::{EasingKind, ZoomAnimator, ZoomDirection, ZoomLimits, ZoomStep};
