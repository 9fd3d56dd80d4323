//! Support message shapes

use serde::{Deserialize, Serialize};

/// Number of affirmations in a structured support message
pub const AFFIRMATION_COUNT: usize = 3;

/// A concrete support message. Plain text serializes as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportMessage {
    /// One or two sentences of support
    Text(String),
    /// Supportive message plus exactly three affirmations
    Structured {
        supportive: String,
        affirmations: Vec<String>,
    },
}

impl SupportMessage {
    /// The supportive sentence regardless of shape
    pub fn supportive_text(&self) -> &str {
        match self {
            SupportMessage::Text(text) => text,
            SupportMessage::Structured { supportive, .. } => supportive,
        }
    }

    /// Affirmations (empty for plain text)
    pub fn affirmations(&self) -> &[String] {
        match self {
            SupportMessage::Text(_) => &[],
            SupportMessage::Structured { affirmations, .. } => affirmations,
        }
    }
}
