//! Process-wide settings, loaded once and passed to component constructors

use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_GENERATION_ENDPOINT, GENERATION_TIMEOUT_SECS, WALKER_TIMEOUT_SECS};

/// Generation service settings
#[derive(Clone)]
pub struct GenerationSettings {
    /// Bearer credential; `None` disables generation
    pub api_key: Option<String>,
    /// Endpoint override
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            timeout: Duration::from_secs(GENERATION_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenerationSettings {
    /// Credential with blank values treated as missing
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Endpoint to POST to
    pub fn endpoint_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_GENERATION_ENDPOINT)
    }
}

/// Walker engine settings
#[derive(Debug, Clone)]
pub struct WalkerSettings {
    /// Engine executable
    pub jac_bin: PathBuf,
    /// Walker program entry point
    pub entry_point: PathBuf,
    pub timeout: Duration,
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            jac_bin: PathBuf::from("jac"),
            entry_point: PathBuf::from("jaseci/walkers/main.jac"),
            timeout: Duration::from_secs(WALKER_TIMEOUT_SECS),
        }
    }
}

/// How the richer variant runs its walker calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkerSchedule {
    /// One after another, in pipeline order
    #[default]
    Sequential,
    /// All four at once after generation
    Concurrent,
}

/// All settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub walker: WalkerSettings,
    pub schedule: WalkerSchedule,
}
