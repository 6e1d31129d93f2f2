//! Finite State Machine for Enemy Behavior
//!
//! The enemy runs a three-state machine driven by a single distance threshold.
//! Transitions are evaluated once per tick before the state's motion is applied.
//!
//! # Transition Rule
//!
//! - distance to target `<= chase_range` enters `Chase` from any state
//! - `Chase` with distance `> chase_range` drops back to `Patrol`
//! - everything else keeps the current state
//!
//! `Idle` is never entered by the rule itself; it is only reachable through an
//! explicit override by the host.
//!
//! # Example
//!
//! ```ignore
//! let next = EnemyState::Patrol.next(Some(4.0), 5.0);
//! assert_eq!(next, EnemyState::Chase);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Enemy State
// ============================================================================

/// Behavior state of an enemy agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Standing still. Produces no displacement.
    Idle,
    /// Wandering in a random direction that is resampled periodically.
    #[default]
    Patrol,
    /// Moving straight at the target.
    Chase,
}

impl EnemyState {
    /// State name for debugging and logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Patrol => "Patrol",
            Self::Chase => "Chase",
        }
    }

    /// Apply the transition rule.
    ///
    /// `distance` is `None` when the target is unresolved or unreadable, in
    /// which case the state never changes.
    #[must_use]
    pub fn next(self, distance: Option<f32>, chase_range: f32) -> Self {
        let Some(distance) = distance else {
            return self;
        };

        if distance <= chase_range {
            Self::Chase
        } else if self == Self::Chase {
            Self::Patrol
        } else {
            self
        }
    }
}

impl fmt::Display for EnemyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// State Change
// ============================================================================

/// A state change produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// State before the tick
    pub from: EnemyState,
    /// State after the tick
    pub to: EnemyState,
}

impl StateChange {
    /// Build a change record, or `None` if the state did not change.
    #[must_use]
    pub fn between(from: EnemyState, to: EnemyState) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: f32 = 5.0;

    #[test]
    fn test_within_range_always_chases() {
        for state in [EnemyState::Idle, EnemyState::Patrol, EnemyState::Chase] {
            for distance in [0.0, 2.5, 4.999, RANGE] {
                assert_eq!(
                    state.next(Some(distance), RANGE),
                    EnemyState::Chase,
                    "{state} at {distance} should chase"
                );
            }
        }
    }

    #[test]
    fn test_chase_out_of_range_patrols() {
        assert_eq!(
            EnemyState::Chase.next(Some(RANGE + 0.001), RANGE),
            EnemyState::Patrol
        );
        assert_eq!(EnemyState::Chase.next(Some(100.0), RANGE), EnemyState::Patrol);
    }

    #[test]
    fn test_out_of_range_keeps_patrol_and_idle() {
        assert_eq!(EnemyState::Patrol.next(Some(6.0), RANGE), EnemyState::Patrol);
        assert_eq!(EnemyState::Idle.next(Some(6.0), RANGE), EnemyState::Idle);
    }

    #[test]
    fn test_no_distance_keeps_state() {
        for state in [EnemyState::Idle, EnemyState::Patrol, EnemyState::Chase] {
            assert_eq!(state.next(None, RANGE), state);
        }
    }

    #[test]
    fn test_default_is_patrol() {
        assert_eq!(EnemyState::default(), EnemyState::Patrol);
    }

    #[test]
    fn test_state_change_between() {
        assert!(StateChange::between(EnemyState::Patrol, EnemyState::Patrol).is_none());

        let change = StateChange::between(EnemyState::Patrol, EnemyState::Chase).unwrap();
        assert_eq!(change.from, EnemyState::Patrol);
        assert_eq!(change.to, EnemyState::Chase);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(EnemyState::Chase.to_string(), "Chase");
        assert_eq!(EnemyState::Idle.name(), "Idle");
    }
}
