//! Project-level configuration support
//!
//! Loads `stylecoach.toml` from the working directory (or an explicit path).
//!
//! # Configuration Format
//!
//! ```toml
//! # stylecoach.toml
//!
//! [thresholds]
//! dominance = 40   # primary % for a "pure" profile
//! hybrid = 25      # secondary % for a "hybrid" profile
//!
//! [lexicon]
//! version = "v1"           # built-in lexicon
//! path = "lexicon.toml"    # custom lexicon file, relative to this file
//!
//! [defaults]
//! format = "text"
//! all_roles = false
//! ```

use crate::classifier::{StyleClassifier, StyleThresholds};
use crate::error::StyleResult;
use crate::lexicon::{load_lexicon, Lexicon};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "stylecoach.toml";

/// Threshold overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ThresholdsConfig {
    #[serde(default)]
    pub dominance: Option<f64>,
    #[serde(default)]
    pub hybrid: Option<f64>,
}

/// Lexicon selection
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LexiconConfig {
    /// Built-in lexicon version
    #[serde(default)]
    pub version: Option<String>,
    /// Custom lexicon file; takes priority over `version`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Default CLI flags
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliDefaults {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub all_roles: Option<bool>,
}

/// Engine configuration; every field is optional so layers can be merged
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub defaults: CliDefaults,

    /// Directory relative lexicon paths are resolved against (not serialized)
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl StyleConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file; relative lexicon paths resolve against its directory
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: StyleConfig) {
        if other.thresholds.dominance.is_some() {
            self.thresholds.dominance = other.thresholds.dominance;
        }
        if other.thresholds.hybrid.is_some() {
            self.thresholds.hybrid = other.thresholds.hybrid;
        }
        if other.lexicon.version.is_some() {
            self.lexicon.version = other.lexicon.version;
        }
        if other.lexicon.path.is_some() {
            self.lexicon.path = other.lexicon.path;
            self.base_dir = other.base_dir;
        }
        if other.defaults.format.is_some() {
            self.defaults.format = other.defaults.format;
        }
        if other.defaults.all_roles.is_some() {
            self.defaults.all_roles = other.defaults.all_roles;
        }
    }

    /// Effective thresholds, validated
    pub fn thresholds(&self) -> StyleResult<StyleThresholds> {
        let defaults = StyleThresholds::default();
        StyleThresholds::new(
            self.thresholds.dominance.unwrap_or(defaults.dominance),
            self.thresholds.hybrid.unwrap_or(defaults.hybrid),
        )
    }

    /// Custom lexicon path resolved against the config file's directory
    pub fn lexicon_path(&self) -> Option<PathBuf> {
        let path = self.lexicon.path.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        Some(match &self.base_dir {
            Some(base) => base.join(path),
            None => path.clone(),
        })
    }

    /// Load the configured lexicon (custom file first, then built-in version)
    pub fn load_lexicon(&self) -> StyleResult<Arc<Lexicon>> {
        if let Some(path) = self.lexicon_path() {
            debug!("Using custom lexicon {}", path.display());
            return Lexicon::from_file(&path).map(Arc::new);
        }
        load_lexicon(self.lexicon.version.as_deref())
    }

    /// Build a classifier from this configuration
    pub fn build_classifier(&self) -> StyleResult<StyleClassifier> {
        StyleClassifier::new(self.load_lexicon()?, self.thresholds()?)
    }

    pub fn default_format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }

    pub fn all_roles(&self) -> bool {
        self.defaults.all_roles.unwrap_or(false)
    }
}

/// Load `stylecoach.toml` from a directory.
///
/// A missing file yields defaults. A file that fails to parse is logged and
/// ignored so a broken config never blocks a run.
pub fn load_project_config(dir: &Path) -> StyleConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        match StyleConfig::from_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    StyleConfig::default()
}

#[cfg(test)]
mod tests;
