//! JSON reporter
//!
//! Pretty-printed JSON. `classify -f json` output is the input format of
//! `stylecoach report`.

use anyhow::Result;
use serde::Serialize;

/// Render any report value as JSON
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
