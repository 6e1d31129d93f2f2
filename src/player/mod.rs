//! Player control module
//!
//! Movement, jumping and firing for a side-scrolling player, plus the stat
//! block and speed modifiers that go with it.

mod controller;
mod modifiers;

pub use controller::{PlayerConfig, PlayerController};
pub use modifiers::{PlayerStats, SpeedBoost};
