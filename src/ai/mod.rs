//! AI module
//!
//! Provides the enemy patrol/chase state machine, its buff table, and the
//! steering helpers it moves with.

pub mod buffs;
mod enemy;
mod fsm;
mod steering;

pub use buffs::BuffTable;
pub use enemy::{AgentHost, EnemyBehavior, EnemyConfig};
pub use fsm::{EnemyState, StateChange};
pub use steering::{Heading, Seek, SteeringBehavior, random_planar_direction};
