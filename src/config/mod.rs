//! Configuration module for stylecoach
//!
//! This module handles:
//! - Project-level configuration (stylecoach.toml)
//! - User-level configuration (~/.config/stylecoach/config.toml)
//! - Environment variable overrides
//!
//! Priority, highest first: environment, project file (or `--config`), user file.

mod project_config;
mod user_config;

pub use project_config::{
    load_project_config, CliDefaults, LexiconConfig, StyleConfig, ThresholdsConfig,
    CONFIG_FILE_NAME,
};
pub use user_config::{
    env_overrides, load_user_config, user_config_path, ENV_DOMINANCE_THRESHOLD,
    ENV_HYBRID_THRESHOLD, ENV_LEXICON_PATH, ENV_LEXICON_VERSION, EXAMPLE_CONFIG,
};

use std::path::Path;

/// Resolve the effective configuration.
///
/// An explicit `config_path` must load; discovered files only warn on failure.
pub fn load_config(dir: &Path, config_path: Option<&Path>) -> anyhow::Result<StyleConfig> {
    let mut config = load_user_config().unwrap_or_default();

    match config_path {
        Some(path) => config.merge(StyleConfig::from_file(path)?),
        None => config.merge(load_project_config(dir)),
    }

    config.merge(env_overrides(|key| std::env::var(key).ok()));
    Ok(config)
}
