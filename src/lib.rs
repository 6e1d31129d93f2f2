//! Gameplay behaviors for a small action game
//!
//! This crate provides:
//! - An enemy patrol/chase state machine with stackable buffs
//! - A side-scrolling player controller (move, jump, fire)
//! - A headless fixed-step host built on hecs
//! - RON/JSON configuration

pub mod ai;
pub mod core;
pub mod ecs;
pub mod input;
pub mod player;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{AgentHost, EnemyBehavior, EnemyConfig, EnemyState};
    pub use crate::core::{
        Behavior, ConfigError, GameEvent, GameplayConfig, SimConfig, SimContext, Simulation,
    };
    pub use crate::ecs::{Name, Projectile, Tag, Transform, Velocity, World};
    pub use crate::input::{Input, InputAction, InputMapper, Key};
    pub use crate::player::{PlayerConfig, PlayerController, PlayerStats, SpeedBoost};
    pub use glam::{Quat, Vec3};
}
