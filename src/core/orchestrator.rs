//! Orchestrator: one check-in from input to composed response
//!
//! Pipeline:
//! 1. normalize mood and note
//! 2. classify sentiment
//! 3. generate support, or fall back to the catalog
//! 4. (richer variant) analyze_mood, log_mood, store_suggestion, trend_agent
//! 5. compose the response with status "ready"
//!
//! No step is retried and no step can abort the pipeline.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::classifier::classify;
use crate::core::fallback;
use crate::core::generation::{GenerationClient, GenerationMode};
use crate::core::walker::{JacWalker, WalkerEngine};
use crate::types::{
    ComposedResponse, MoodRequest, NormalizedMood, Provenance, SentimentResult, Settings,
    SupportMessage, WalkerOp, WalkerReport, WalkerSchedule,
};

/// Request pipeline shared by all handlers
#[derive(Clone)]
pub struct Orchestrator {
    generator: GenerationClient,
    walkers: Arc<dyn WalkerEngine>,
    schedule: WalkerSchedule,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("generation_enabled", &self.generator.is_enabled())
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(
        generator: GenerationClient,
        walkers: Arc<dyn WalkerEngine>,
        schedule: WalkerSchedule,
    ) -> Self {
        Self { generator, walkers, schedule }
    }

    /// Build the production pipeline: HTTP generation and the jac CLI
    pub fn from_settings(settings: Settings) -> Self {
        Self::new(
            GenerationClient::new(settings.generation),
            Arc::new(JacWalker::new(settings.walker)),
            settings.schedule,
        )
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.is_enabled()
    }

    /// Basic variant: sentiment plus a plain-text support message
    pub async fn analyze(&self, request: &MoodRequest) -> ComposedResponse {
        let input = request.normalize();
        let sentiment = classify(&input.mood);
        let (support, provenance) = self.generate_or_fallback(&input, GenerationMode::Text).await;

        info!(mood = %input.mood, %sentiment, %provenance, "check-in analyzed");
        ComposedResponse::new(SentimentResult::new(sentiment, provenance), support, provenance)
    }

    /// Richer variant: structured support plus every walker result.
    /// `raw` is the caller's original payload, forwarded to `log_mood`.
    pub async fn support(&self, request: &MoodRequest, raw: &Value) -> ComposedResponse {
        let input = request.normalize();
        let sentiment = classify(&input.mood);
        let (support, provenance) = self
            .generate_or_fallback(&input, GenerationMode::Structured)
            .await;

        let report = self.run_walkers(&input, raw, support.supportive_text()).await;

        info!(
            mood = %input.mood,
            %sentiment,
            %provenance,
            walker_errors = report.error_count(),
            "support composed"
        );
        ComposedResponse::new(SentimentResult::new(sentiment, provenance), support, provenance)
            .with_walkers(report)
    }

    async fn generate_or_fallback(
        &self,
        input: &NormalizedMood,
        mode: GenerationMode,
    ) -> (SupportMessage, Provenance) {
        match self.generator.generate(input, mode).await {
            Ok(message) => (message, Provenance::Generated),
            Err(reason) => {
                debug!(mood = %input.mood, %reason, "using fallback support");
                let entry = fallback::lookup(&input.mood);
                let message = match mode {
                    GenerationMode::Text => entry.to_text(),
                    GenerationMode::Structured => entry.to_structured(),
                };
                (message, Provenance::Fallback)
            }
        }
    }

    async fn run_walkers(&self, input: &NormalizedMood, raw: &Value, supportive: &str) -> WalkerReport {
        let analyze_payload = json!({ "mood": input.mood, "note": input.note_or_empty() });
        let store_payload = json!({ "text": supportive });
        let trend_payload = json!({});

        let engine = self.walkers.as_ref();
        match self.schedule {
            WalkerSchedule::Sequential => {
                let mood_analysis = engine.invoke(WalkerOp::AnalyzeMood, &analyze_payload).await;
                let log = engine.invoke(WalkerOp::LogMood, raw).await;
                let store = engine.invoke(WalkerOp::StoreSuggestion, &store_payload).await;
                let trend = engine.invoke(WalkerOp::TrendAgent, &trend_payload).await;
                WalkerReport { mood_analysis, log, store, trend }
            }
            WalkerSchedule::Concurrent => {
                let (mood_analysis, log, store, trend) = futures_util::future::join4(
                    engine.invoke(WalkerOp::AnalyzeMood, &analyze_payload),
                    engine.invoke(WalkerOp::LogMood, raw),
                    engine.invoke(WalkerOp::StoreSuggestion, &store_payload),
                    engine.invoke(WalkerOp::TrendAgent, &trend_payload),
                )
                .await;
                WalkerReport { mood_analysis, log, store, trend }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerationSettings, Sentiment, WalkerResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and answers with a fixed result
    struct RecordingWalker {
        calls: Mutex<Vec<(WalkerOp, Value)>>,
    }

    #[async_trait]
    impl WalkerEngine for RecordingWalker {
        async fn invoke(&self, op: WalkerOp, payload: &Value) -> WalkerResult {
            self.calls.lock().unwrap().push((op, payload.clone()));
            WalkerResult::Json(json!({ "ok": op.name() }))
        }
    }

    fn offline_orchestrator(walker: Arc<RecordingWalker>, schedule: WalkerSchedule) -> Orchestrator {
        Orchestrator::new(GenerationClient::new(GenerationSettings::default()), walker, schedule)
    }

    #[tokio::test]
    async fn test_walkers_run_in_pipeline_order() {
        let walker = Arc::new(RecordingWalker { calls: Mutex::new(Vec::new()) });
        let orch = offline_orchestrator(walker.clone(), WalkerSchedule::Sequential);
        let raw = json!({ "mood": "Sad", "note": " rough day ", "ts": 1700000000, "username": "guest" });
        let req: MoodRequest = serde_json::from_value(raw.clone()).unwrap();

        let resp = orch.support(&req, &raw).await;
        assert_eq!(resp.analysis.sentiment, Sentiment::Negative);

        let calls = walker.calls.lock().unwrap();
        let ops: Vec<WalkerOp> = calls.iter().map(|(op, _)| *op).collect();
        assert_eq!(ops, WalkerOp::all().to_vec());

        assert_eq!(calls[0].1, json!({ "mood": "sad", "note": "rough day" }));
        assert_eq!(calls[1].1, raw);
        assert_eq!(calls[2].1, json!({ "text": fallback::lookup("sad").supportive }));
        assert_eq!(calls[3].1, json!({}));
    }

    #[tokio::test]
    async fn test_concurrent_schedule_runs_every_walker() {
        let walker = Arc::new(RecordingWalker { calls: Mutex::new(Vec::new()) });
        let orch = offline_orchestrator(walker.clone(), WalkerSchedule::Concurrent);
        let raw = json!({ "mood": "happy" });
        let req: MoodRequest = serde_json::from_value(raw.clone()).unwrap();

        let resp = orch.support(&req, &raw).await;
        assert_eq!(resp.trend, Some(WalkerResult::Json(json!({ "ok": "trend_agent" }))));
        assert_eq!(walker.calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_basic_variant_skips_walkers() {
        let walker = Arc::new(RecordingWalker { calls: Mutex::new(Vec::new()) });
        let orch = offline_orchestrator(walker.clone(), WalkerSchedule::Sequential);

        let resp = orch.analyze(&MoodRequest::new("tired", "")).await;
        assert_eq!(resp.support, fallback::lookup("tired").to_text());
        assert!(resp.log.is_none());
        assert!(walker.calls.lock().unwrap().is_empty());
    }
}
