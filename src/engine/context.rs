// Mouse context: what the mouse is currently "for".
//
//   Normal  - gameplay, the camera follows mouse movement
//   Menu    - a menu is open, camera updates are suspended
//   Casting - a spell is queued; the camera behaves as in Normal
//
// The context is stored in one place and pushed to listeners when it changes
// (e.g. cursor visibility). Readers poll it through `ModeSource`.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    Normal,
    Menu,
    Casting,
}

impl MouseMode {
    /// Only an open menu freezes the camera.
    pub fn suspends_camera(self) -> bool {
        self == MouseMode::Menu
    }

    pub fn cursor_visible(self) -> bool {
        self == MouseMode::Menu
    }
}

/// Read-only view of the current mouse mode.
pub trait ModeSource {
    fn current_mode(&self) -> MouseMode;
}

impl ModeSource for MouseMode {
    fn current_mode(&self) -> MouseMode {
        *self
    }
}

type ModeListener = Box<dyn Fn(MouseMode) + Send + Sync>;

#[derive(Resource, Default)]
pub struct MouseContext {
    mode: MouseMode,
    listeners: Vec<ModeListener>,
}

impl MouseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run on every mode change.
    pub fn subscribe(&mut self, listener: impl Fn(MouseMode) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Store the new mode and notify listeners. Setting the current mode again
    /// is a no-op. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: MouseMode) -> bool {
        if mode == self.mode {
            return false;
        }
        log::debug!("mouse context {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        for listener in &self.listeners {
            listener(mode);
        }
        true
    }

    /// Flip between `mode` and Normal.
    pub fn toggle(&mut self, mode: MouseMode) {
        let next = if self.mode == mode { MouseMode::Normal } else { mode };
        self.set_mode(next);
    }

    pub fn mode(&self) -> MouseMode {
        self.mode
    }
}

impl ModeSource for MouseContext {
    fn current_mode(&self) -> MouseMode {
        self.mode
    }
}

impl std::fmt::Debug for MouseContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseContext")
            .field("mode", &self.mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
