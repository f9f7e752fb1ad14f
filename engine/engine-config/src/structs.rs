//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::defaults;
use anyhow::{anyhow, Result};
use games_gomoku::MAX_BOARD_SIZE;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_host() -> String {
    defaults::host().into()
}
fn d_port() -> u16 {
    defaults::port()
}
fn d_allowed_origins() -> Vec<String> {
    defaults::allowed_origins().to_vec()
}
fn d_model_path() -> String {
    defaults::model_path().into()
}
fn d_model_filename() -> String {
    defaults::model_filename().into()
}
fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_accelerator() -> bool {
    defaults::accelerator()
}
fn d_fallback() -> Fallback {
    defaults::fallback()
}
fn d_c_puct() -> f32 {
    defaults::c_puct()
}
fn d_temperature() -> f32 {
    defaults::temperature()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_easy() -> u32 {
    defaults::easy_simulations()
}
fn d_medium() -> u32 {
    defaults::medium_simulations()
}
fn d_hard() -> u32 {
    defaults::hard_simulations()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub difficulty: DifficultyConfig,
}

impl CentralConfig {
    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        let size = self.model.board_size;
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(anyhow!(
                "model.board_size must be in 1..={}, got {}",
                MAX_BOARD_SIZE,
                size
            ));
        }

        for (name, sims) in [
            ("easy", self.difficulty.easy),
            ("medium", self.difficulty.medium),
            ("hard", self.difficulty.hard),
        ] {
            if sims == 0 {
                return Err(anyhow!("difficulty.{} must be at least 1 simulation", name));
            }
        }

        if !self.mcts.c_puct.is_finite() || self.mcts.c_puct < 0.0 {
            return Err(anyhow!(
                "mcts.c_puct must be finite and non-negative, got {}",
                self.mcts.c_puct
            ));
        }

        if !self.mcts.temperature.is_finite() || self.mcts.temperature < 0.0 {
            return Err(anyhow!(
                "mcts.temperature must be finite and non-negative, got {}",
                self.mcts.temperature
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default = "d_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: defaults::host().into(),
            port: defaults::port(),
            allowed_origins: defaults::allowed_origins().to_vec(),
        }
    }
}

/// What the service plays with when the model file cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Rule-based pattern evaluator.
    Heuristic,
    /// Flat policy, zero value.
    Uniform,
    /// Refuse to start.
    None,
}

impl FromStr for Fallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(Fallback::Heuristic),
            "uniform" => Ok(Fallback::Uniform),
            "none" => Ok(Fallback::None),
            other => Err(format!("unknown fallback: {}", other)),
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fallback::Heuristic => "heuristic",
            Fallback::Uniform => "uniform",
            Fallback::None => "none",
        };
        f.write_str(name)
    }
}

/// Evaluator model configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory holding model files.
    #[serde(default = "d_model_path")]
    pub path: String,
    #[serde(default = "d_model_filename")]
    pub filename: String,
    /// Side length N of the N×N board the model was trained for.
    #[serde(default = "d_board_size")]
    pub board_size: usize,
    /// Request a GPU execution provider when one is available.
    #[serde(default = "d_accelerator")]
    pub accelerator: bool,
    #[serde(default = "d_fallback")]
    pub fallback: Fallback,
}

impl ModelConfig {
    /// Full path of the model file.
    pub fn model_file(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.path).join(&self.filename)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: defaults::model_path().into(),
            filename: defaults::model_filename().into(),
            board_size: defaults::board_size(),
            accelerator: defaults::accelerator(),
            fallback: defaults::fallback(),
        }
    }
}

/// Search parameters shared by every difficulty level
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_c_puct")]
    pub c_puct: f32,
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Wall-clock cap per move in milliseconds; 0 disables it.
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Fixed RNG seed for reproducible play. Unset means fresh entropy per move.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MctsConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        (self.time_budget_ms > 0).then_some(Duration::from_millis(self.time_budget_ms))
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            c_puct: defaults::c_puct(),
            temperature: defaults::temperature(),
            time_budget_ms: defaults::time_budget_ms(),
            seed: None,
        }
    }
}

/// Simulation counts per difficulty level
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DifficultyConfig {
    #[serde(default = "d_easy")]
    pub easy: u32,
    #[serde(default = "d_medium")]
    pub medium: u32,
    #[serde(default = "d_hard")]
    pub hard: u32,
}

impl DifficultyConfig {
    /// Simulation count for a difficulty name, or `None` if the name is unknown.
    pub fn simulations(&self, difficulty: &str) -> Option<u32> {
        match difficulty {
            "easy" => Some(self.easy),
            "medium" => Some(self.medium),
            "hard" => Some(self.hard),
            _ => None,
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy: defaults::easy_simulations(),
            medium: defaults::medium_simulations(),
            hard: defaults::hard_simulations(),
        }
    }
}
