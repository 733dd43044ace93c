//! `systemctl`-backed service control.

use std::process::{Command, Output};

use crate::error::{Error, Result};
use crate::service::ManagedService;

/// A systemd unit driven through the `systemctl` binary.
#[derive(Debug, Clone)]
pub struct SystemdService {
    unit: String,
    systemctl: String,
}

impl SystemdService {
    pub fn new(unit: impl Into<String>, systemctl: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            systemctl: systemctl.into(),
        }
    }

    fn control(&self, action: &'static str) -> Result<()> {
        tracing::info!(unit = %self.unit, action, "Running service action");

        let output: Output = Command::new(&self.systemctl)
            .args([action, self.unit.as_str()])
            .output()
            .map_err(|e| Error::ServiceAction {
                unit: self.unit.clone(),
                action,
                detail: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(Error::ServiceAction {
            unit: self.unit.clone(),
            action,
            detail: format!("{}: {}", output.status, stderr.trim()),
        })
    }
}

impl ManagedService for SystemdService {
    fn name(&self) -> &str {
        &self.unit
    }

    fn running(&self) -> Result<bool> {
        let status = Command::new(&self.systemctl)
            .args(["is-active", "--quiet", self.unit.as_str()])
            .status()
            .map_err(|source| Error::ServiceQuery {
                unit: self.unit.clone(),
                source,
            })?;

        tracing::debug!(unit = %self.unit, %status, "Queried service state");
        Ok(status.success())
    }

    fn start(&self) -> Result<()> {
        self.control("start")
    }

    fn restart(&self) -> Result<()> {
        self.control("restart")
    }
}
