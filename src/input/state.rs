//! Input handling

use std::collections::HashSet;

/// Keys the gameplay layer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    Space,
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Per-frame key state, fed by the host
#[derive(Debug, Default)]
pub struct Input {
    /// Currently pressed keys
    pressed_keys: HashSet<Key>,
    /// Keys that were just pressed this frame
    just_pressed_keys: HashSet<Key>,
    /// Keys that were just released this frame
    just_released_keys: HashSet<Key>,
}

impl Input {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to clear per-frame state
    pub fn update(&mut self) {
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
    }

    /// Record a key press
    pub fn press(&mut self, key: Key) {
        if self.pressed_keys.insert(key) {
            self.just_pressed_keys.insert(key);
        }
    }

    /// Record a key release
    pub fn release(&mut self, key: Key) {
        if self.pressed_keys.remove(&key) {
            self.just_released_keys.insert(key);
        }
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a key was just released this frame
    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.just_released_keys.contains(&key)
    }
}
