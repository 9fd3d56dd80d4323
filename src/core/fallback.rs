//! Fallback catalog: deterministic support when generation is unavailable

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::{SupportMessage, AFFIRMATION_COUNT};

/// Key used for moods the catalog does not know
pub const DEFAULT_MOOD: &str = "okay";

/// One hand-authored catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    /// Short one-line message (basic variant)
    pub text: &'static str,
    /// Supportive sentence (richer variant)
    pub supportive: &'static str,
    pub affirmations: [&'static str; AFFIRMATION_COUNT],
}

impl FallbackEntry {
    /// Plain-text support message
    pub fn to_text(&self) -> SupportMessage {
        SupportMessage::Text(self.text.to_string())
    }

    /// Structured support message
    pub fn to_structured(&self) -> SupportMessage {
        SupportMessage::Structured {
            supportive: self.supportive.to_string(),
            affirmations: self.affirmations.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Entry for `okay`, also served for unknown moods
static OKAY_ENTRY: FallbackEntry = FallbackEntry {
    text: "I'm here with you. Even small steps forward matter.",
    supportive: "You are doing okay. Small steps matter.",
    affirmations: ["I am on my way.", "Small steps count.", "I am present."],
};

lazy_static! {
    static ref CATALOG: HashMap<&'static str, FallbackEntry> = {
        let mut m = HashMap::new();
        m.insert("sad", FallbackEntry {
            text: "I'm really sorry you're feeling this way. You don't have to go through it alone.",
            supportive: "I am sorry you feel sad. You are not alone.",
            affirmations: ["I allow myself to feel.", "This feeling will pass.", "I am worthy of care."],
        });
        m.insert("tired", FallbackEntry {
            text: "It sounds like you're exhausted. Resting when you can really matters.",
            supportive: "You sound tired. Rest if you can.",
            affirmations: ["Rest is productive.", "My needs are valid.", "I can rest and return refreshed."],
        });
        m.insert("angry", FallbackEntry {
            text: "Strong feelings can be heavy. Taking a pause can help.",
            supportive: "Anger is a signal worth listening to. A slow breath can give you room.",
            affirmations: ["My feelings are valid.", "I can pause before I act.", "I choose how I respond."],
        });
        m.insert("anxious", FallbackEntry {
            text: "Anxiety can feel overwhelming. You're safe right now.",
            supportive: "Anxiety can feel overwhelming, but you are safe right now.",
            affirmations: ["I am safe in this moment.", "I can take one breath at a time.", "This will pass."],
        });
        m.insert("stressed", FallbackEntry {
            text: "That sounds like a lot to carry. One thing at a time is enough.",
            supportive: "Stress can be overwhelming. Try a slow breathing exercise.",
            affirmations: ["I can handle this.", "One step at a time.", "I am stronger than stress."],
        });
        m.insert("happy", FallbackEntry {
            text: "That's wonderful to hear. Moments like this are worth celebrating.",
            supportive: "Glad you are happy!",
            affirmations: ["I deserve joy.", "I celebrate small wins.", "My happiness matters."],
        });
        m.insert(DEFAULT_MOOD, OKAY_ENTRY.clone());
        m
    };
}

/// Look up a normalized mood. Unknown moods resolve to the default entry.
pub fn lookup(mood: &str) -> &'static FallbackEntry {
    CATALOG.get(mood).unwrap_or(&OKAY_ENTRY)
}

/// Moods with a dedicated entry
pub fn known_moods() -> Vec<&'static str> {
    let mut moods: Vec<&'static str> = CATALOG.keys().copied().collect();
    moods.sort_unstable();
    moods
}
