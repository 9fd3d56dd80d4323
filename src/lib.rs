//! MindMate: mood check-in orchestrator
//!
//! mood → classifier → generation (or fallback catalog) → walkers → response

pub mod core;
pub mod types;

// =============================================================================
// CONFIDENCE - reported with the sentiment, encodes provenance
// =============================================================================

/// Confidence when the support message was generated
pub const CONFIDENCE_GENERATED: f64 = 0.9;

/// Confidence when the support message came from the fallback catalog
pub const CONFIDENCE_FALLBACK: f64 = 0.5;

// =============================================================================
// EXTERNAL CALLS
// =============================================================================

/// Generation request timeout (seconds)
pub const GENERATION_TIMEOUT_SECS: u64 = 15;

/// Per-walker invocation timeout (seconds)
pub const WALKER_TIMEOUT_SECS: u64 = 10;

/// Used when no endpoint override is configured
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://api.example-gemini.com/v1/generate";

// =============================================================================
// RESPONSE
// =============================================================================

/// Status on every composed response
pub const STATUS_READY: &str = "ready";

pub const VERSION: &str = "1.0.0";
