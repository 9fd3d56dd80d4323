//! Walker gateway: invoke named walkers on the external graph engine
//!
//! The engine is a black box behind [`WalkerEngine`]. The production
//! implementation shells out to the `jac` CLI:
//!
//! ```text
//! <jac_bin> run <entry_point> --walker <op>    (payload as JSON on stdin)
//! ```
//!
//! Output is read from stdout (stderr if stdout is empty) and parsed as
//! JSON, falling back to raw text. Launch failures and timeouts become
//! `{"error": ...}` results.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::types::{WalkerOp, WalkerResult, WalkerSettings};

/// Anything that can run a named walker with a JSON payload
#[async_trait]
pub trait WalkerEngine: Send + Sync {
    /// Run one walker. Must not fail: errors are returned as
    /// [`WalkerResult::Error`].
    async fn invoke(&self, op: WalkerOp, payload: &Value) -> WalkerResult;
}

/// Walker engine backed by the `jac` command-line runner
#[derive(Debug, Clone)]
pub struct JacWalker {
    settings: WalkerSettings,
}

impl JacWalker {
    pub fn new(settings: WalkerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WalkerSettings {
        &self.settings
    }

    fn command(&self, op: WalkerOp) -> Command {
        let mut cmd = Command::new(&self.settings.jac_bin);
        cmd.arg("run")
            .arg(&self.settings.entry_point)
            .arg("--walker")
            .arg(op.name())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, op: WalkerOp, payload: &Value) -> std::io::Result<String> {
        let input = serde_json::to_vec(payload)?;
        let mut child = self.command(op).spawn()?;
        let stdin = child.stdin.take();

        // stdin is fed while stdout/stderr drain; a walker echoing a large
        // payload blocks once both pipes are full
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A walker that exits without reading stdin closes the pipe early
                if let Err(e) = stdin.write_all(&input).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
            }
            Ok(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        fed?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            return Ok(stdout.to_string());
        }
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

#[async_trait]
impl WalkerEngine for JacWalker {
    async fn invoke(&self, op: WalkerOp, payload: &Value) -> WalkerResult {
        let timeout = self.settings.timeout;

        match tokio::time::timeout(timeout, self.run(op, payload)).await {
            Ok(Ok(out)) => {
                let result = WalkerResult::from_output(&out);
                debug!(walker = %op, kind = result.kind(), "walker finished");
                result
            }
            Ok(Err(e)) => {
                warn!(walker = %op, error = %e, "walker invocation failed");
                WalkerResult::error(e.to_string())
            }
            Err(_) => {
                warn!(walker = %op, timeout_secs = timeout.as_secs_f64(), "walker timed out");
                WalkerResult::error(format!(
                    "walker {} timed out after {:.1}s",
                    op,
                    timeout.as_secs_f64()
                ))
            }
        }
    }
}
