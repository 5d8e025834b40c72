//! Constants and error types shared by every part of the arena.

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::ConfigError;
