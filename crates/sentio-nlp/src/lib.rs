//! Sentio NLP collaborators.
//!
//! The actual sentiment classification, entity extraction, and language
//! detection run in a managed service; this crate only speaks its HTTP
//! interface and provides pure helpers over its output.

pub mod client;
pub mod redact;

pub use client::{NlpClient, NlpConfig};
pub use redact::{categorize, entity_risk_level, is_sensitive_entity, redact, RiskLevel};
