//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the move service and by anything else that needs search or model settings.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GOMOKU_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (`config.defaults.toml`, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GOMOKU_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GOMOKU_COMMON_LOG_LEVEL=debug
//!     GOMOKU_WEB_PORT=3000
//!     GOMOKU_MODEL_BOARD_SIZE=9
//!     GOMOKU_MODEL_FALLBACK=none
//!     GOMOKU_DIFFICULTY_HARD=3200
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
