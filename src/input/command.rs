//! Key to Action Mapping
//!
//! Physical keys map to logical [`InputAction`]s so controllers never test
//! raw keys. Several keys may drive one action (A and the left arrow both
//! move left), and bindings can be changed at runtime.
//!
//! # Example
//!
//! ```ignore
//! let mapper = InputMapper::with_defaults();
//! let axis = mapper.axis(&input, InputAction::MoveLeft, InputAction::MoveRight);
//! if mapper.is_action_just_pressed(&input, InputAction::Jump) {
//!     jump();
//! }
//! ```

use rustc_hash::FxHashMap;

use crate::input::{Input, Key};

// ============================================================================
// Input Actions
// ============================================================================

/// Logical input actions that map to player behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move towards negative X
    MoveLeft,
    /// Move towards positive X
    MoveRight,
    /// Jump while grounded
    Jump,
    /// Fire a projectile
    Fire,
}

// ============================================================================
// Input Mapper
// ============================================================================

/// Maps physical keys to logical actions.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    /// Key to action bindings
    key_bindings: FxHashMap<Key, InputAction>,
    /// Reverse lookup: action to keys
    action_keys: FxHashMap<InputAction, Vec<Key>>,
}

impl InputMapper {
    /// Create an empty input mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A/D and the arrow keys move, W jumps, Space fires.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();

        mapper.bind(Key::A, InputAction::MoveLeft);
        mapper.bind(Key::D, InputAction::MoveRight);
        mapper.bind(Key::ArrowLeft, InputAction::MoveLeft);
        mapper.bind(Key::ArrowRight, InputAction::MoveRight);

        mapper.bind(Key::W, InputAction::Jump);
        mapper.bind(Key::Space, InputAction::Fire);

        mapper
    }

    /// Bind a key to an action.
    ///
    /// If the key was previously bound, the old binding is replaced.
    pub fn bind(&mut self, key: Key, action: InputAction) {
        if let Some(old_action) = self.key_bindings.get(&key)
            && let Some(keys) = self.action_keys.get_mut(old_action)
        {
            keys.retain(|k| *k != key);
        }

        self.key_bindings.insert(key, action);
        self.action_keys.entry(action).or_default().push(key);
    }

    /// Unbind a key.
    pub fn unbind(&mut self, key: Key) {
        if let Some(action) = self.key_bindings.remove(&key)
            && let Some(keys) = self.action_keys.get_mut(&action)
        {
            keys.retain(|k| *k != key);
        }
    }

    /// Get the action for a key.
    #[must_use]
    pub fn get_action(&self, key: Key) -> Option<InputAction> {
        self.key_bindings.get(&key).copied()
    }

    /// Get all keys bound to an action.
    #[must_use]
    pub fn get_keys(&self, action: InputAction) -> &[Key] {
        self.action_keys
            .get(&action)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any key bound to `action` is held.
    #[must_use]
    pub fn is_action_pressed(&self, input: &Input, action: InputAction) -> bool {
        self.get_keys(action)
            .iter()
            .any(|key| input.is_key_pressed(*key))
    }

    /// Whether any key bound to `action` went down this frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, input: &Input, action: InputAction) -> bool {
        self.get_keys(action)
            .iter()
            .any(|key| input.is_key_just_pressed(*key))
    }

    /// Raw axis in `{-1, 0, 1}`. Holding both directions cancels out.
    #[must_use]
    pub fn axis(&self, input: &Input, negative: InputAction, positive: InputAction) -> f32 {
        let mut axis = 0.0;
        if self.is_action_pressed(input, negative) {
            axis -= 1.0;
        }
        if self.is_action_pressed(input, positive) {
            axis += 1.0;
        }
        axis
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mapper_defaults() {
        let mapper = InputMapper::with_defaults();

        assert_eq!(mapper.get_action(Key::A), Some(InputAction::MoveLeft));
        assert_eq!(mapper.get_action(Key::W), Some(InputAction::Jump));
        assert_eq!(mapper.get_action(Key::Space), Some(InputAction::Fire));
        assert_eq!(mapper.get_action(Key::Escape), None);
    }

    #[test]
    fn test_input_mapper_rebind() {
        let mut mapper = InputMapper::with_defaults();

        mapper.bind(Key::W, InputAction::Fire);
        assert_eq!(mapper.get_action(Key::W), Some(InputAction::Fire));
        assert!(mapper.get_keys(InputAction::Jump).is_empty());
        assert!(mapper.get_keys(InputAction::Fire).contains(&Key::W));
    }

    #[test]
    fn test_input_mapper_unbind() {
        let mut mapper = InputMapper::with_defaults();

        mapper.unbind(Key::A);
        assert!(mapper.get_action(Key::A).is_none());
        assert_eq!(mapper.get_keys(InputAction::MoveLeft), &[Key::ArrowLeft]);
    }

    #[test]
    fn test_axis() {
        let mapper = InputMapper::with_defaults();
        let mut input = Input::new();
        let axis = |input: &Input| mapper.axis(input, InputAction::MoveLeft, InputAction::MoveRight);

        assert_eq!(axis(&input), 0.0);

        input.press(Key::ArrowLeft);
        assert_eq!(axis(&input), -1.0);

        input.press(Key::D);
        assert_eq!(axis(&input), 0.0);

        input.release(Key::ArrowLeft);
        assert_eq!(axis(&input), 1.0);
    }

    #[test]
    fn test_action_just_pressed() {
        let mapper = InputMapper::with_defaults();
        let mut input = Input::new();

        input.press(Key::W);
        assert!(mapper.is_action_just_pressed(&input, InputAction::Jump));

        input.update();
        assert!(!mapper.is_action_just_pressed(&input, InputAction::Jump));
        assert!(mapper.is_action_pressed(&input, InputAction::Jump));
    }
}
