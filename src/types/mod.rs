//! Core types for MindMate

mod error;
mod mood;
mod response;
mod settings;
mod support;
mod walker;

pub use error::{ApiError, Unavailable};
pub use mood::{MoodRequest, NormalizedMood, Provenance, Sentiment, SentimentResult};
pub use response::{ComposedResponse, WalkerReport};
pub use settings::{GenerationSettings, Settings, WalkerSchedule, WalkerSettings};
pub use support::{SupportMessage, AFFIRMATION_COUNT};
pub use walker::{WalkerOp, WalkerResult};
