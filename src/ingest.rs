//! Transcript ingestion
//!
//! Reads message records from a JSON array or JSON Lines stream. Record-level
//! problems (bad JSON, missing required fields) are caller errors and abort
//! the read; a missing `text` field is tolerated and scores as zero signal.

use crate::error::{StyleError, StyleResult};
use crate::models::{Message, Role, StyleProfile};
use std::io::Read;
use tracing::debug;

fn parse_error(what: &str, e: serde_json::Error) -> StyleError {
    StyleError::MalformedConversation(format!("{}: {}", what, e))
}

/// Parse messages from a JSON array or JSON Lines document
pub fn parse_messages(content: &str) -> StyleResult<Vec<Message>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| parse_error("invalid message array", e));
    }

    let mut messages = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let msg: Message = serde_json::from_str(line)
            .map_err(|e| parse_error(&format!("line {}", i + 1), e))?;
        messages.push(msg);
    }
    debug!("Parsed {} messages from JSON Lines", messages.len());
    Ok(messages)
}

/// Read messages from any reader (file, stdin)
pub fn read_messages(mut reader: impl Read) -> StyleResult<Vec<Message>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| StyleError::MalformedConversation(format!("failed to read input: {}", e)))?;
    parse_messages(&content)
}

/// Keep only messages written by the developer
pub fn user_messages(messages: Vec<Message>) -> Vec<Message> {
    let before = messages.len();
    let kept: Vec<Message> = messages.into_iter().filter(|m| m.role == Role::User).collect();
    if kept.len() != before {
        debug!("Dropped {} non-user messages", before - kept.len());
    }
    kept
}

/// Parse profiles emitted by `classify --format json` (an array, or an
/// object with a `profiles` array)
pub fn parse_profiles(content: &str) -> StyleResult<Vec<StyleProfile>> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| parse_error("invalid profiles JSON", e))?;
    let array = match value {
        serde_json::Value::Object(mut obj) => obj
            .remove("profiles")
            .unwrap_or(serde_json::Value::Array(Vec::new())),
        other => other,
    };
    serde_json::from_value(array).map_err(|e| parse_error("invalid profile record", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_A: &str =
        r#"{"id":"1","subject_id":"dev","text":"a bug","timestamp":"2026-01-01T00:00:00Z","role":"user"}"#;
    const LINE_B: &str =
        r#"{"id":"2","subject_id":"dev","text":"sure","timestamp":"2026-01-01T00:01:00Z","role":"assistant"}"#;

    #[test]
    fn test_null_text_does_not_abort_transcript() {
        let null_text =
            r#"{"id":"3","subject_id":"dev","text":null,"timestamp":"2026-01-01T00:02:00Z","role":"user"}"#;
        let content = format!("{}\n{}\n", LINE_A, null_text);
        let messages = parse_messages(&content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "");
    }

    #[test]
    fn test_parse_json_lines() {
        let content = format!("{}\n\n{}\n", LINE_A, LINE_B);
        let messages = parse_messages(&content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Other);
    }

    #[test]
    fn test_parse_json_array() {
        let content = format!("  [{}, {}]", LINE_A, LINE_B);
        let messages = parse_messages(&content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "a bug");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_messages("").unwrap().is_empty());
        assert!(parse_messages("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_names_line_number() {
        let content = format!("{}\nnot json\n", LINE_A);
        let err = parse_messages(&content).unwrap_err();
        assert!(matches!(err, StyleError::MalformedConversation(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        let line = r#"{"id":"1","subject_id":"dev","text":"x","role":"user"}"#;
        assert!(parse_messages(line).is_err());
    }

    #[test]
    fn test_user_messages_filter() {
        let content = format!("{}\n{}", LINE_A, LINE_B);
        let kept = user_messages(parse_messages(&content).unwrap());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_read_messages() {
        let messages = read_messages(LINE_A.as_bytes()).unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_parse_profiles_wrapped_and_bare() {
        assert!(parse_profiles(r#"{"profiles": []}"#).unwrap().is_empty());
        assert!(parse_profiles("[]").unwrap().is_empty());
        assert!(parse_profiles(r#"[{"subject_id": "x"}]"#).is_err());
    }
}
