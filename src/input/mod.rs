//! Input handling module
//!
//! Key state tracking plus a key-to-action mapping layer.

mod command;
mod state;

pub use command::{InputAction, InputMapper};
pub use state::{Input, Key};
