// Input state tracking for keyboard and mouse
// Abstracts winit events into a queryable per-frame snapshot (ControlFrame)

use std::collections::HashSet;

use bevy_ecs::prelude::*;
use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::camera::CameraInput;
use super::locomotion::MoveKeys;

/// Everything the rig consumes in one tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    pub camera: CameraInput,
    pub keys: MoveKeys,
    /// True only on the tick the jump key went down
    pub jump: bool,
}

pub struct InputState {
    // Keyboard
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    // Mouse: raw motion accumulated this frame, reset in end_frame()
    pub mouse_motion: Vec2,

    // Scroll: accumulated vertical scroll this frame, reset in end_frame()
    pub scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_motion: Vec2::ZERO,
            scroll_delta: 0.0,
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(key),
                        ElementState::Released => self.release(key),
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.scroll_delta += y;
            }
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
            }
            _ => {}
        }
    }

    /// Raw mouse motion is used for panning so it keeps working when the
    /// cursor is hidden or pinned.
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_motion += Vec2::new(delta.0 as f32, delta.1 as f32);
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        // Key repeat arrives as extra Pressed events; only the first counts.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Snapshot for this tick. Screen Y grows downward, pan Y grows upward.
    pub fn frame(&self) -> ControlFrame {
        ControlFrame {
            camera: CameraInput {
                pan: Vec2::new(self.mouse_motion.x, -self.mouse_motion.y),
                scroll: self.scroll_delta,
            },
            keys: MoveKeys {
                forward: self.is_key_held(KeyCode::KeyW),
                backward: self.is_key_held(KeyCode::KeyS),
                left: self.is_key_held(KeyCode::KeyA),
                right: self.is_key_held(KeyCode::KeyD),
            },
            jump: self.was_key_pressed(KeyCode::Space),
        }
    }

    /// Call once per frame after the tick has consumed input.
    /// Resets per-frame accumulators.
    pub fn end_frame(&mut self) {
        self.scroll_delta = 0.0;
        self.mouse_motion = Vec2::ZERO;
        self.keys_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
