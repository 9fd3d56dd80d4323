//! Walker operations and their tagged results

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named walkers invoked on the external graph engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkerOp {
    /// Deterministic mood analysis
    AnalyzeMood,
    /// Record the check-in in the graph
    LogMood,
    /// Attach the produced suggestion to the graph
    StoreSuggestion,
    /// Aggregate mood trends
    TrendAgent,
}

impl WalkerOp {
    /// Walker name as passed on the engine's command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyzeMood => "analyze_mood",
            Self::LogMood => "log_mood",
            Self::StoreSuggestion => "store_suggestion",
            Self::TrendAgent => "trend_agent",
        }
    }

    pub fn all() -> [WalkerOp; 4] {
        [Self::AnalyzeMood, Self::LogMood, Self::StoreSuggestion, Self::TrendAgent]
    }
}

impl std::fmt::Display for WalkerOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of one walker invocation. Never an exception.
///
/// Serializes as the parsed JSON itself, `{"raw": ...}`, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WalkerResult {
    /// Output was not JSON; kept verbatim
    Raw { raw: String },
    /// Invocation failed (launch error, I/O, timeout)
    Error { error: String },
    /// Output parsed as JSON
    Json(Value),
}

impl WalkerResult {
    /// Interpret captured output: JSON when it parses, raw text otherwise
    pub fn from_output(out: &str) -> Self {
        match serde_json::from_str::<Value>(out) {
            Ok(value) => WalkerResult::Json(value),
            Err(_) => WalkerResult::Raw { raw: out.to_string() },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        WalkerResult::Error { error: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WalkerResult::Error { .. })
    }

    /// Short label for logs and terminal output
    pub fn kind(&self) -> &'static str {
        match self {
            WalkerResult::Json(_) => "json",
            WalkerResult::Raw { .. } => "raw",
            WalkerResult::Error { .. } => "error",
        }
    }
}
