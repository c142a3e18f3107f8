//! stylecoach - developer interaction style classification and coaching
//!
//! Scores developer messages against a weighted pattern lexicon, ranks five
//! interaction styles, labels each profile pure, hybrid or balanced, attaches
//! coaching recommendations and rolls profiles up into per-developer summaries.
//!
//! ```no_run
//! use chrono::Utc;
//! use stylecoach::{classify, models::Message};
//!
//! let messages = vec![Message::new("m1", "dev-1", "fix this bug in the parser", Utc::now())];
//! let profile = classify(&messages)?;
//! println!("{} ({}%)", profile.primary, profile.confidence);
//! # Ok::<(), stylecoach::StyleError>(())
//! ```

pub mod classifier;
pub mod coaching;
pub mod config;
pub mod error;
pub mod ingest;
pub mod lexicon;
pub mod models;
pub mod reporters;
pub mod summary;

pub use classifier::{classify, StyleClassifier, StyleThresholds, SubjectOutcome};
pub use coaching::recommend;
pub use error::{StyleError, StyleResult};
pub use lexicon::{load_lexicon, Lexicon};
pub use summary::{report, report_all, DeveloperStyleSummary, StyleTrend, TimeWindow};
