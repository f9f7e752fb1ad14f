//! HTTP request handlers.

mod health;
mod moves;

pub use health::*;
pub use moves::*;
