//! Sentiment classifier: closed two-bucket mapping from mood label
//!
//! Confidence is not decided here; the orchestrator assigns it from
//! generation provenance.

use crate::types::Sentiment;

/// Moods classified as negative. Everything else is positive.
pub const NEGATIVE_MOODS: [&str; 4] = ["sad", "tired", "angry", "anxious"];

/// Classify a normalized mood. Total over all strings.
pub fn classify(mood: &str) -> Sentiment {
    if NEGATIVE_MOODS.contains(&mood) {
        Sentiment::Negative
    } else {
        Sentiment::Positive
    }
}
