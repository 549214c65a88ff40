//! Store backend subprocess protocol.
//!
//! This module handles communication with external store backend
//! binaries (e.g. `evently-store-firestore`) using JSON over
//! stdin/stdout.
//!
//! The protocol is language-agnostic: any executable that speaks the
//! JSON protocol can be a backend. Backends manage their own credentials
//! and connection details.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use evently_core::error::{EventlyError, EventlyResult};
use evently_core::protocol::{Command as StoreCommand, Request, Response};

const STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Provider {
    name: String,
    timeout: Duration,
}

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider {
            name: name.to_string(),
            timeout: STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> EventlyResult<std::path::PathBuf> {
        let binary_name = format!("evently-store-{}", self.name);
        let binary_path = which::which(&binary_name).map_err(|_| {
            EventlyError::StoreNotInstalled(format!(
                "Backend '{}' not found. Install it with:\n  cargo install {}",
                self.name, binary_name
            ))
        })?;
        Ok(binary_path)
    }

    /// Call a backend command, failing if it does not answer in time.
    pub async fn call_with_timeout<R: DeserializeOwned>(
        &self,
        command: StoreCommand,
        params: serde_json::Value,
    ) -> EventlyResult<R> {
        timeout(self.timeout, self.call(command, params))
            .await
            .map_err(|_| EventlyError::StoreTimeout(self.timeout.as_secs()))?
    }

    pub async fn call<R: DeserializeOwned>(
        &self,
        command: StoreCommand,
        params: serde_json::Value,
    ) -> EventlyResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| EventlyError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = Command::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                EventlyError::Store {
                    code: "spawn-failed".to_string(),
                    message: format!("Failed to spawn {}: {}", binary_path.display(), e),
                }
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        // Wait for process and collect output
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(EventlyError::Store {
                code: "backend-failed".to_string(),
                message: format!(
                    "Backend exited with status: {}",
                    output.status.code().unwrap_or(-1)
                ),
            });
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(EventlyError::Store {
                code: "empty-response".to_string(),
                message: "Backend returned no response".to_string(),
            });
        }

        let response: Response<R> =
            serde_json::from_str(&response_str).map_err(|e| EventlyError::Store {
                code: "bad-response".to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { code, message } => Err(EventlyError::Store { code, message }),
        }
    }
}
