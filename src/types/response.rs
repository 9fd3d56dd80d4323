//! Composed response returned to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::types::{Provenance, SentimentResult, SupportMessage, WalkerResult};

/// Final answer for one check-in. Walker fields are present only in the
/// richer variant and each one is filled independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub analysis: SentimentResult,
    pub support: SupportMessage,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_analysis: Option<WalkerResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<WalkerResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<WalkerResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<WalkerResult>,
    pub status: String,
    pub responded_at: DateTime<Utc>,
}

/// Results of the four walker calls for one request
#[derive(Debug, Clone, PartialEq)]
pub struct WalkerReport {
    pub mood_analysis: WalkerResult,
    pub log: WalkerResult,
    pub store: WalkerResult,
    pub trend: WalkerResult,
}

impl WalkerReport {
    /// Number of walker calls that failed to run
    pub fn error_count(&self) -> usize {
        [&self.mood_analysis, &self.log, &self.store, &self.trend]
            .iter()
            .filter(|r| r.is_error())
            .count()
    }
}

impl ComposedResponse {
    /// Response without walker results
    pub fn new(analysis: SentimentResult, support: SupportMessage, provenance: Provenance) -> Self {
        Self {
            analysis,
            support,
            provenance,
            mood_analysis: None,
            log: None,
            store: None,
            trend: None,
            status: crate::STATUS_READY.to_string(),
            responded_at: Utc::now(),
        }
    }

    /// Attach walker results
    pub fn with_walkers(mut self, report: WalkerReport) -> Self {
        self.mood_analysis = Some(report.mood_analysis);
        self.log = Some(report.log);
        self.store = Some(report.store);
        self.trend = Some(report.trend);
        self
    }
}
