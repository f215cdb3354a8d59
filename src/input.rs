//! Keyboard and pointer state to per-frame commands
//!
//! Hosts feed raw key and pointer events in as they arrive. Once per frame
//! the simulation takes a [`TickInput`] snapshot; the accumulated turn is
//! consumed by that read.

use crate::sim::TickInput;

/// Physical controls this game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Fire,
}

impl Key {
    /// Map a browser-style key code (`"KeyW"`, ...) to a control
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Forward),
            "KeyS" | "ArrowDown" => Some(Key::Backward),
            "KeyA" => Some(Key::StrafeLeft),
            "KeyD" => Some(Key::StrafeRight),
            "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Live input state between frames
#[derive(Debug, Clone)]
pub struct InputState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    fire: bool,
    turn: f32,
    sensitivity: f32,
}

impl InputState {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            fire: false,
            turn: 0.0,
            sensitivity,
        }
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Forward => self.forward = pressed,
            Key::Backward => self.backward = pressed,
            Key::StrafeLeft => self.left = pressed,
            Key::StrafeRight => self.right = pressed,
            Key::Fire => self.fire = pressed,
        }
    }

    /// Key event by code; unknown codes are ignored
    pub fn key_code(&mut self, code: &str, pressed: bool) {
        if let Some(key) = Key::from_code(code) {
            self.set_key(key, pressed);
        }
    }

    /// Primary pointer button
    pub fn set_fire(&mut self, held: bool) {
        self.fire = held;
    }

    /// Relative horizontal pointer movement. Non-finite deltas are dropped.
    pub fn pointer_moved(&mut self, dx: f32) {
        if dx.is_finite() {
            self.turn += dx * self.sensitivity;
        }
    }

    /// Accumulated turn, reset to zero by the read
    pub fn take_turn(&mut self) -> f32 {
        std::mem::take(&mut self.turn)
    }

    /// Command for the next frame
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            turn: self.take_turn(),
            fire: self.fire,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(crate::consts::MOUSE_SENSITIVITY)
    }
}
