//! Input validation: length ceilings and the pattern-based security scan.

use crate::analysis::SUPPORTED_LANGUAGES;
use crate::{Error, Result};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Maximum text length for the synchronous path.
pub const MAX_TEXT_LENGTH_SYNC: usize = 5_000;
/// Maximum text length for the asynchronous path (1 MiB).
pub const MAX_TEXT_LENGTH_ASYNC: usize = 1_048_576;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    SqlInjection,
    Xss,
    CommandInjection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    pub kind: ThreatKind,
    pub pattern: String,
}

const SQL_INJECTION_PATTERNS: &[&str] = &[
    r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|UNION)\b",
    r"(?i)\b(OR|AND)\s+\d+\s*=\s*\d+",
    r"(?i)\b(OR|AND)\s+\w+\s*=\s*\w+",
];

const XSS_PATTERNS: &[&str] = &[
    r"(?i)<script[^>]*>.*?</script>",
    r"(?i)javascript:",
    r"(?i)on\w+\s*=",
    r"(?i)<iframe[^>]*>",
    r"(?i)<object[^>]*>",
    r"(?i)<embed[^>]*>",
];

const COMMAND_INJECTION_PATTERNS: &[&str] = &[
    r"[;&|`$]",
    r"(?i)\b(cat|ls|pwd|whoami|id|uname)\b",
    r"(?i)\b(ping|nslookup|traceroute)\b",
];

static SQL_INJECTION: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(SQL_INJECTION_PATTERNS).expect("invalid SQL pattern"));
static XSS: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(XSS_PATTERNS).expect("invalid XSS pattern"));
static COMMAND_INJECTION: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(COMMAND_INJECTION_PATTERNS).expect("invalid command pattern")
});

/// Scan text for known-malicious patterns.
///
/// This is a coarse gate, not a parser; anything matching is rejected before
/// any external call is made.
pub fn scan_text(text: &str) -> Vec<Threat> {
    let mut threats = Vec::new();
    for idx in SQL_INJECTION.matches(text) {
        threats.push(Threat {
            kind: ThreatKind::SqlInjection,
            pattern: SQL_INJECTION_PATTERNS[idx].to_string(),
        });
    }
    for idx in XSS.matches(text) {
        threats.push(Threat {
            kind: ThreatKind::Xss,
            pattern: XSS_PATTERNS[idx].to_string(),
        });
    }
    for idx in COMMAND_INJECTION.matches(text) {
        threats.push(Threat {
            kind: ThreatKind::CommandInjection,
            pattern: COMMAND_INJECTION_PATTERNS[idx].to_string(),
        });
    }
    threats
}

fn validate_text(text: &str, max_len: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Validation("Text cannot be empty".to_string()));
    }
    if text.chars().count() > max_len {
        return Err(Error::Validation(format!(
            "Text exceeds maximum length of {} characters",
            max_len
        )));
    }
    let threats = scan_text(text);
    if !threats.is_empty() {
        // Detail stays in the logs; callers only see the generic message.
        tracing::warn!(threat_count = threats.len(), threats = ?threats, "security threat detected");
        return Err(Error::Validation(
            "Text contains potentially malicious content".to_string(),
        ));
    }
    Ok(())
}

/// Validate text for the synchronous analysis path.
pub fn validate_sync_text(text: &str) -> Result<()> {
    validate_text(text, MAX_TEXT_LENGTH_SYNC)
}

/// Validate text for the asynchronous admission path.
pub fn validate_async_text(text: &str) -> Result<()> {
    validate_text(text, MAX_TEXT_LENGTH_ASYNC)
}

/// Validate a 2-3 letter ISO-style language code.
pub fn validate_language_code(code: &str) -> Result<()> {
    let lower = code.to_lowercase();
    if !SUPPORTED_LANGUAGES.contains(&lower.as_str()) {
        return Err(Error::UnsupportedLanguage(code.to_string()));
    }
    Ok(())
}
