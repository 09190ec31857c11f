//! Parsing of generated messages.
//!
//! The model is asked for JSON, but answers wrapped in prose or markdown
//! fences, or written as a `Subject:` line followed by the body, are
//! accepted too. Anything without both a subject and a body is malformed.
//!
//! # Supported Formats
//!
//! 1. **JSON** (preferred): `{"subject": "...", "body": "..."}`
//! 2. **Header**: `Subject: ...` on one line, the body below it

use crate::core::error::DomainError;
use serde::Deserialize;

/// Subject and body extracted from a model response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedMessage {
    pub subject: String,
    pub body: String,
}

/// Parse a generation response.
///
/// # Examples
///
/// ```
/// use campaign_domain::prompt::parse_generated_message;
///
/// let parsed = parse_generated_message(r#"{"subject": "Hi", "body": "Hello Ada"}"#).unwrap();
/// assert_eq!(parsed.subject, "Hi");
/// assert!(parse_generated_message("no structure here").is_err());
/// ```
pub fn parse_generated_message(response: &str) -> Result<GeneratedMessage, DomainError> {
    let parsed = parse_json(response)
        .or_else(|| parse_header(response))
        .ok_or_else(|| {
            DomainError::MalformedOutput("expected JSON with subject and body".to_string())
        })?;

    let subject = parsed.subject.trim().to_string();
    let body = parsed.body.trim().to_string();
    if subject.is_empty() {
        return Err(DomainError::MalformedOutput("empty subject".to_string()));
    }
    if body.is_empty() {
        return Err(DomainError::MalformedOutput("empty body".to_string()));
    }
    Ok(GeneratedMessage { subject, body })
}

fn parse_json(response: &str) -> Option<GeneratedMessage> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

fn parse_header(response: &str) -> Option<GeneratedMessage> {
    let mut lines = response.lines();
    let subject = lines.by_ref().find_map(|line| {
        let line = line.trim().trim_start_matches(['*', '#', ' ']);
        line.strip_prefix("Subject:")
            .or_else(|| line.strip_prefix("subject:"))
            .map(|s| s.trim_matches(['*', ' ']).to_string())
    })?;
    let body = lines
        .map(|l| l.strip_prefix("Body:").unwrap_or(l))
        .collect::<Vec<_>>()
        .join("\n");
    Some(GeneratedMessage { subject, body })
}
