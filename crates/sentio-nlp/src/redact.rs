//! Pure helpers over PII detection output: redaction, categorization, risk.

use sentio_core::analysis::PiiEntity;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

fn redaction_text(entity_type: &str) -> &'static str {
    match entity_type {
        "NAME" => "[NAME]",
        "EMAIL" => "[EMAIL]",
        "PHONE" => "[PHONE]",
        "SSN" => "[SSN]",
        "CREDIT_DEBIT_NUMBER" => "[CARD_NUMBER]",
        "ADDRESS" => "[ADDRESS]",
        "DATE_TIME" => "[DATE]",
        "PASSPORT_NUMBER" => "[PASSPORT]",
        "DRIVER_ID" => "[DRIVER_ID]",
        "BANK_ACCOUNT_NUMBER" => "[ACCOUNT_NUMBER]",
        "BANK_ROUTING" => "[ROUTING_NUMBER]",
        "IP_ADDRESS" => "[IP_ADDRESS]",
        "MAC_ADDRESS" => "[MAC_ADDRESS]",
        "URL" => "[URL]",
        _ => "[REDACTED]",
    }
}

/// Replace each detected entity with a typed placeholder.
///
/// Entities are applied back-to-front so earlier replacements do not shift
/// the offsets of later ones. Entities with out-of-range offsets are skipped.
pub fn redact(text: &str, entities: &[PiiEntity]) -> String {
    let mut sorted: Vec<&PiiEntity> = entities.iter().collect();
    sorted.sort_by(|a, b| b.begin_offset.cmp(&a.begin_offset));

    let mut redacted = text.to_string();
    for entity in sorted {
        if entity.end_offset > redacted.len() || entity.begin_offset >= entity.end_offset {
            continue;
        }
        if !redacted.is_char_boundary(entity.begin_offset)
            || !redacted.is_char_boundary(entity.end_offset)
        {
            continue;
        }
        redacted.replace_range(
            entity.begin_offset..entity.end_offset,
            redaction_text(&entity.entity_type),
        );
    }
    redacted
}

/// Count entities per type.
pub fn categorize(entities: &[PiiEntity]) -> HashMap<String, usize> {
    let mut categories = HashMap::new();
    for entity in entities {
        *categories.entry(entity.entity_type.clone()).or_insert(0) += 1;
    }
    categories
}

pub fn is_sensitive_entity(entity_type: &str) -> bool {
    matches!(
        entity_type,
        "SSN" | "CREDIT_DEBIT_NUMBER" | "BANK_ACCOUNT_NUMBER" | "PASSPORT_NUMBER" | "DRIVER_ID"
    )
}

pub fn entity_risk_level(entity_type: &str) -> RiskLevel {
    match entity_type {
        "SSN" | "CREDIT_DEBIT_NUMBER" | "BANK_ACCOUNT_NUMBER" => RiskLevel::Critical,
        "PASSPORT_NUMBER" | "DRIVER_ID" => RiskLevel::High,
        "EMAIL" | "PHONE" | "ADDRESS" => RiskLevel::Medium,
        "NAME" | "DATE_TIME" => RiskLevel::Low,
        _ => RiskLevel::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(entity_type: &str, begin: usize, end: usize) -> PiiEntity {
        PiiEntity {
            entity_type: entity_type.to_string(),
            begin_offset: begin,
            end_offset: end,
            score: 0.99,
        }
    }

    #[test]
    fn test_redact_single_entity() {
        let text = "write to bob@example.com today";
        let redacted = redact(text, &[entity("EMAIL", 9, 24)]);
        assert_eq!(redacted, "write to [EMAIL] today");
    }

    #[test]
    fn test_redact_multiple_entities_preserves_offsets() {
        //            0123456789012345678901234
        let text = "Alice lives at 12 Elm St.";
        let redacted = redact(
            text,
            &[entity("NAME", 0, 5), entity("ADDRESS", 15, 24)],
        );
        assert_eq!(redacted, "[NAME] lives at [ADDRESS].");
    }

    #[test]
    fn test_redact_skips_out_of_range_entities() {
        let text = "short";
        assert_eq!(redact(text, &[entity("EMAIL", 2, 50)]), "short");
    }

    #[test]
    fn test_redact_unknown_type_uses_generic_placeholder() {
        let redacted = redact("abc", &[entity("SOMETHING_NEW", 0, 3)]);
        assert_eq!(redacted, "[REDACTED]");
    }

    #[test]
    fn test_categorize_counts_types() {
        let categories = categorize(&[
            entity("EMAIL", 0, 1),
            entity("EMAIL", 2, 3),
            entity("NAME", 4, 5),
        ]);
        assert_eq!(categories["EMAIL"], 2);
        assert_eq!(categories["NAME"], 1);
    }

    #[test]
    fn test_risk_classification() {
        assert!(is_sensitive_entity("SSN"));
        assert!(!is_sensitive_entity("NAME"));
        assert_eq!(entity_risk_level("SSN"), RiskLevel::Critical);
        assert_eq!(entity_risk_level("NAME"), RiskLevel::Low);
        assert_eq!(entity_risk_level("UNKNOWN"), RiskLevel::Medium);
    }
}
