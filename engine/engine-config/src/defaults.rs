//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file lives at the workspace root so operators can read it
//! next to their own config.toml. It is embedded at compile time.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::structs::Fallback;

const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    web: WebDefaults,
    model: ModelDefaults,
    mcts: MctsDefaults,
    difficulty: DifficultyDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct WebDefaults {
    host: String,
    port: u16,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelDefaults {
    path: String,
    filename: String,
    board_size: usize,
    accelerator: bool,
    fallback: Fallback,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    c_puct: f32,
    temperature: f32,
    time_budget_ms: u64,
}

#[derive(Debug, Deserialize)]
struct DifficultyDefaults {
    easy: u32,
    medium: u32,
    hard: u32,
}

// ============================================================================
// Public accessors
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Web
pub fn host() -> &'static str {
    &DEFAULTS.web.host
}
pub fn port() -> u16 {
    DEFAULTS.web.port
}
pub fn allowed_origins() -> &'static [String] {
    &DEFAULTS.web.allowed_origins
}

// Model
pub fn model_path() -> &'static str {
    &DEFAULTS.model.path
}
pub fn model_filename() -> &'static str {
    &DEFAULTS.model.filename
}
pub fn board_size() -> usize {
    DEFAULTS.model.board_size
}
pub fn accelerator() -> bool {
    DEFAULTS.model.accelerator
}
pub fn fallback() -> Fallback {
    DEFAULTS.model.fallback
}

// MCTS
pub fn c_puct() -> f32 {
    DEFAULTS.mcts.c_puct
}
pub fn temperature() -> f32 {
    DEFAULTS.mcts.temperature
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.mcts.time_budget_ms
}

// Difficulty
pub fn easy_simulations() -> u32 {
    DEFAULTS.difficulty.easy
}
pub fn medium_simulations() -> u32 {
    DEFAULTS.difficulty.medium
}
pub fn hard_simulations() -> u32 {
    DEFAULTS.difficulty.hard
}
