//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::Router;
use mindmate::types::{GenerationSettings, WalkerSettings};

/// Serve `router` on an ephemeral local port; returns the generate URL
pub async fn spawn_generation_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1/generate", addr)
}

/// Generation settings pointed at a local endpoint
pub fn generation_settings(endpoint: &str, timeout: Duration) -> GenerationSettings {
    GenerationSettings {
        api_key: Some("test-key".to_string()),
        endpoint: Some(endpoint.to_string()),
        timeout,
    }
}

/// Walker settings whose engine binary does not exist
pub fn unreachable_walkers() -> WalkerSettings {
    WalkerSettings {
        jac_bin: PathBuf::from("/nonexistent/mindmate-test/jac"),
        entry_point: PathBuf::from("main.jac"),
        timeout: Duration::from_secs(2),
    }
}

/// Write an executable shell script standing in for the `jac` CLI.
/// The walker name arrives as `$4` (`run <entry> --walker <op>`).
pub fn write_fake_jac(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("jac");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Walker settings running a fake jac script
pub fn fake_walkers(jac_bin: PathBuf, timeout: Duration) -> WalkerSettings {
    WalkerSettings {
        jac_bin,
        entry_point: PathBuf::from("jaseci/walkers/main.jac"),
        timeout,
    }
}
