//! Core modules for MindMate

pub mod api;
pub mod classifier;
pub mod fallback;
pub mod generation;
pub mod orchestrator;
pub mod walker;

pub use api::{create_router, run_server};
pub use classifier::classify;
pub use fallback::{lookup, FallbackEntry};
pub use generation::{GenerationClient, GenerationMode, ResponseEnvelope};
pub use orchestrator::Orchestrator;
pub use walker::{JacWalker, WalkerEngine};
