//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the GOMOKU_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("GOMOKU_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from GOMOKU_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "GOMOKU_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Read or parse failures are logged and replaced by defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u16, f32, bool, enums with FromStr, ...)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
    // Comma-separated list
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: GOMOKU_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "GOMOKU_COMMON_LOG_LEVEL");

    // Web
    env_override!(config, web.host, "GOMOKU_WEB_HOST");
    env_override!(config, web.port, "GOMOKU_WEB_PORT", parse);
    env_override!(
        config,
        web.allowed_origins,
        "GOMOKU_WEB_ALLOWED_ORIGINS",
        list
    );

    // Model
    env_override!(config, model.path, "GOMOKU_MODEL_PATH");
    env_override!(config, model.filename, "GOMOKU_MODEL_FILENAME");
    env_override!(config, model.board_size, "GOMOKU_MODEL_BOARD_SIZE", parse);
    env_override!(
        config,
        model.accelerator,
        "GOMOKU_MODEL_ACCELERATOR",
        parse
    );
    env_override!(config, model.fallback, "GOMOKU_MODEL_FALLBACK", parse);

    // MCTS
    env_override!(config, mcts.c_puct, "GOMOKU_MCTS_C_PUCT", parse);
    env_override!(config, mcts.temperature, "GOMOKU_MCTS_TEMPERATURE", parse);
    env_override!(
        config,
        mcts.time_budget_ms,
        "GOMOKU_MCTS_TIME_BUDGET_MS",
        parse
    );
    env_override!(config, mcts.seed, "GOMOKU_MCTS_SEED", optional_parse);

    // Difficulty
    env_override!(config, difficulty.easy, "GOMOKU_DIFFICULTY_EASY", parse);
    env_override!(config, difficulty.medium, "GOMOKU_DIFFICULTY_MEDIUM", parse);
    env_override!(config, difficulty.hard, "GOMOKU_DIFFICULTY_HARD", parse);

    config
}
