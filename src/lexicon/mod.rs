//! Pattern Lexicon Registry
//!
//! A lexicon maps every [`StyleCategory`] to an ordered list of weighted
//! pattern rules. Lexicons are declarative TOML documents: the built-in
//! versions are embedded in the binary, custom ones are loaded from disk.
//!
//! # Lexicon Format
//!
//! ```toml
//! version = "team-2026"
//! description = "Optional free text"
//!
//! [categories]
//! strategic_architect = [
//!     { pattern = "architect*", weight = 3.0 },
//!     { pattern = "system design", weight = 3.0 },
//! ]
//! # ... one entry per category
//! ```
//!
//! A lexicon is validated and compiled once, then shared read-only
//! (`Arc<Lexicon>`) across every classification.

mod pattern;

pub use pattern::compile_pattern;

use crate::error::{StyleError, StyleResult};
use crate::models::StyleCategory;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Version used when none is requested
pub const DEFAULT_LEXICON_VERSION: &str = "v1";

const BUILTIN_V1: &str = include_str!("v1.toml");

/// Built-in lexicon versions (version, TOML source)
const BUILTIN_LEXICONS: &[(&str, &str)] = &[("v1", BUILTIN_V1)];

/// A matchable pattern and its contribution weight
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub category: StyleCategory,
    pub pattern: String,
    pub weight: f64,
    matcher: Regex,
}

impl PatternRule {
    pub fn new(category: StyleCategory, pattern: &str, weight: f64) -> StyleResult<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(StyleError::LexiconConfig(format!(
                "{}: pattern '{}' has non-positive weight {}",
                category, pattern, weight
            )));
        }
        Ok(Self {
            category,
            pattern: pattern.to_string(),
            weight,
            matcher: compile_pattern(pattern)?,
        })
    }

    /// Number of non-overlapping matches in `text`
    pub fn count_matches(&self, text: &str) -> usize {
        self.matcher.find_iter(text).count()
    }
}

/// Immutable category → rules mapping
#[derive(Debug, Clone)]
pub struct Lexicon {
    version: String,
    description: Option<String>,
    rules: BTreeMap<StyleCategory, Vec<PatternRule>>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<RuleSpec>>,
}

#[derive(Debug, Deserialize)]
struct RuleSpec {
    pattern: String,
    weight: f64,
}

impl Lexicon {
    /// Build a lexicon from already-constructed rules.
    ///
    /// Rule order within a category is preserved. Every category must end up
    /// with at least one rule.
    pub fn from_rules(version: &str, rules: Vec<PatternRule>) -> StyleResult<Self> {
        if version.trim().is_empty() {
            return Err(StyleError::LexiconConfig("lexicon version is empty".to_string()));
        }

        let mut by_category: BTreeMap<StyleCategory, Vec<PatternRule>> = StyleCategory::all()
            .iter()
            .map(|c| (*c, Vec::new()))
            .collect();
        for rule in rules {
            by_category.entry(rule.category).or_default().push(rule);
        }

        if let Some((category, _)) = by_category.iter().find(|(_, r)| r.is_empty()) {
            return Err(StyleError::LexiconConfig(format!(
                "lexicon '{}': category {} has zero rules",
                version, category
            )));
        }

        Ok(Self {
            version: version.to_string(),
            description: None,
            rules: by_category,
        })
    }

    /// Parse and validate a lexicon TOML document
    pub fn from_toml_str(content: &str) -> StyleResult<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| StyleError::LexiconConfig(format!("failed to parse lexicon: {}", e)))?;

        let mut rules = Vec::new();
        for (name, specs) in &file.categories {
            let category: StyleCategory = name.parse()?;
            for spec in specs {
                rules.push(PatternRule::new(category, &spec.pattern, spec.weight)?);
            }
        }

        let mut lexicon = Self::from_rules(&file.version, rules)?;
        lexicon.description = file.description;
        debug!(
            "Compiled lexicon '{}' with {} rules",
            lexicon.version,
            lexicon.rule_count()
        );
        Ok(lexicon)
    }

    /// Load a custom lexicon file
    pub fn from_file(path: &Path) -> StyleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StyleError::LexiconConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Built-in lexicon by version, compiled once per process
    pub fn builtin(version: &str) -> StyleResult<Arc<Lexicon>> {
        static COMPILED: OnceLock<BTreeMap<&'static str, StyleResult<Arc<Lexicon>>>> =
            OnceLock::new();

        let compiled = COMPILED.get_or_init(|| {
            BUILTIN_LEXICONS
                .iter()
                .map(|(v, source)| (*v, Self::from_toml_str(source).map(Arc::new)))
                .collect()
        });

        compiled.get(version).cloned().unwrap_or_else(|| {
            Err(StyleError::LexiconConfig(format!(
                "unknown lexicon version '{}'. Built-in versions: {}",
                version,
                builtin_versions().join(", ")
            )))
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Rules for one category, in declaration order
    pub fn rules(&self, category: StyleCategory) -> &[PatternRule] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All (category, rules) pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (StyleCategory, &[PatternRule])> + '_ {
        self.rules.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }
}

/// Names of the versions shipped in the binary
pub fn builtin_versions() -> Vec<&'static str> {
    BUILTIN_LEXICONS.iter().map(|(v, _)| *v).collect()
}

/// Resolve a built-in lexicon; `None` selects [`DEFAULT_LEXICON_VERSION`]
pub fn load_lexicon(version: Option<&str>) -> StyleResult<Arc<Lexicon>> {
    Lexicon::builtin(version.unwrap_or(DEFAULT_LEXICON_VERSION))
}
