//! Mood input and sentiment classification types

use serde::{Deserialize, Serialize};

/// Inbound check-in payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl MoodRequest {
    /// Create a request from raw mood and note strings
    pub fn new(mood: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            note: Some(note.into()),
        }
    }

    /// Lower-case, trim, and collapse an empty note to `None`
    pub fn normalize(&self) -> NormalizedMood {
        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        NormalizedMood {
            mood: self.mood.trim().to_lowercase(),
            note,
        }
    }
}

/// Mood and note after normalization; the mood doubles as the catalog key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMood {
    pub mood: String,
    pub note: Option<String>,
}

impl NormalizedMood {
    /// Note text as sent to downstream services (empty when absent)
    pub fn note_or_empty(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// Coarse two-bucket sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Where the support message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by the external generation service
    Generated,
    /// Produced by the local fallback catalog
    Fallback,
}

impl Provenance {
    /// Confidence reported alongside the sentiment.
    /// High only when generation succeeded.
    pub fn confidence(&self) -> f64 {
        match self {
            Provenance::Generated => crate::CONFIDENCE_GENERATED,
            Provenance::Fallback => crate::CONFIDENCE_FALLBACK,
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Generated => write!(f, "generated"),
            Provenance::Fallback => write!(f, "fallback"),
        }
    }
}

/// Sentiment plus provenance-derived confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl SentimentResult {
    pub fn new(sentiment: Sentiment, provenance: Provenance) -> Self {
        Self {
            sentiment,
            confidence: provenance.confidence(),
        }
    }
}
