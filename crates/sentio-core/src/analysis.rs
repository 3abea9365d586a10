//! Sentiment and PII analysis result types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Languages accepted by the external analysis capability.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "zh", "ja", "ko", "ar",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Per-class confidence scores returned by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

impl SentimentScores {
    /// Score for the winning class.
    pub fn for_sentiment(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Mixed => self.mixed,
        }
    }
}

/// Raw outcome of a sentiment call against the external capability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SentimentOutcome {
    pub sentiment: Sentiment,
    pub scores: SentimentScores,
    pub language_code: String,
}

/// Shaped analysis result as stored in the cache and on completed jobs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pii_detected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl AnalysisResult {
    pub fn from_outcome(outcome: &SentimentOutcome) -> Self {
        Self {
            sentiment: outcome.sentiment,
            score: outcome.scores.for_sentiment(outcome.sentiment),
            language_code: Some(outcome.language_code.clone()),
            confidence: None,
            pii_detected: None,
            processing_time_ms: None,
        }
    }
}

/// A single PII entity located in the input text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PiiEntity {
    pub entity_type: String,
    pub begin_offset: usize,
    pub end_offset: usize,
    pub score: f64,
}

/// Outcome of a PII detection call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PiiOutcome {
    pub entities: Vec<PiiEntity>,
}

impl PiiOutcome {
    pub fn pii_detected(&self) -> bool {
        !self.entities.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_serializes_upper_case() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
    }

    #[test]
    fn test_score_for_winning_class() {
        let scores = SentimentScores {
            positive: 0.9,
            negative: 0.02,
            neutral: 0.05,
            mixed: 0.03,
        };
        assert_eq!(scores.for_sentiment(Sentiment::Positive), 0.9);
        assert_eq!(scores.for_sentiment(Sentiment::Mixed), 0.03);
    }

    #[test]
    fn test_pii_detected() {
        let mut outcome = PiiOutcome::default();
        assert!(!outcome.pii_detected());
        outcome.entities.push(PiiEntity {
            entity_type: "EMAIL".to_string(),
            begin_offset: 0,
            end_offset: 5,
            score: 0.99,
        });
        assert!(outcome.pii_detected());
        assert_eq!(outcome.entity_count(), 1);
    }
}
