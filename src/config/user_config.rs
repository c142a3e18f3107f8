//! User-level configuration for stylecoach
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/stylecoach/config.toml

use super::project_config::StyleConfig;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const ENV_DOMINANCE_THRESHOLD: &str = "STYLECOACH_DOMINANCE_THRESHOLD";
pub const ENV_HYBRID_THRESHOLD: &str = "STYLECOACH_HYBRID_THRESHOLD";
pub const ENV_LEXICON_VERSION: &str = "STYLECOACH_LEXICON_VERSION";
pub const ENV_LEXICON_PATH: &str = "STYLECOACH_LEXICON_PATH";

/// Get the user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stylecoach").join("config.toml"))
}

/// Load the user config file, if present and parseable
pub fn load_user_config() -> Option<StyleConfig> {
    let path = user_config_path().filter(|p| p.exists())?;
    match StyleConfig::from_file(&path) {
        Ok(config) => {
            debug!("Loaded user config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Failed to load {}: {:#}", path.display(), e);
            None
        }
    }
}

fn parse_threshold(name: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={}: not a number", name, value);
            None
        }
    }
}

/// Build a config layer from environment variables.
///
/// `lookup` is `std::env::var` in production; tests pass a closure.
pub fn env_overrides(lookup: impl Fn(&str) -> Option<String>) -> StyleConfig {
    let mut config = StyleConfig::default();
    if let Some(v) = lookup(ENV_DOMINANCE_THRESHOLD) {
        config.thresholds.dominance = parse_threshold(ENV_DOMINANCE_THRESHOLD, &v);
    }
    if let Some(v) = lookup(ENV_HYBRID_THRESHOLD) {
        config.thresholds.hybrid = parse_threshold(ENV_HYBRID_THRESHOLD, &v);
    }
    if let Some(v) = lookup(ENV_LEXICON_VERSION) {
        config.lexicon.version = Some(v);
    }
    if let Some(v) = lookup(ENV_LEXICON_PATH) {
        config.lexicon.path = Some(PathBuf::from(v));
    }
    config
}

/// Example config written by `stylecoach init`
pub const EXAMPLE_CONFIG: &str = r#"# stylecoach configuration

[thresholds]
# Primary style percentage needed for a "pure" profile (0-100)
dominance = 40
# Secondary style percentage needed for a "hybrid" profile (0-100)
hybrid = 25

[lexicon]
# Built-in lexicon version
version = "v1"
# Custom lexicon file (takes priority over version)
# path = "lexicon.toml"

[defaults]
# Output format: text, json, markdown
format = "text"
# Classify every message, not only role=user
all_roles = false
"#;
