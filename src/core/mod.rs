//! Core runtime module
//!
//! Contains the behavior lifecycle, the fixed-step simulation loop, events,
//! and configuration.

mod config;
mod engine;
mod events;
mod time;

pub use config::{ConfigError, GameplayConfig, SimConfig};
pub use engine::{Behavior, SimContext, Simulation};
pub use events::{EventQueue, GameEvent, JumpObservers, ObserverId};
pub use time::Time;
