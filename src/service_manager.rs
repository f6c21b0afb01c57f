//! systemd user-session service management
//!
//! A narrow trait over the handful of `systemctl --user` verbs the lifecycle
//! needs. Mutation verbs report failure as errors; state queries return
//! systemd's own state word and degrade to `unknown` instead of aborting,
//! so a status report can be assembled on a machine with no user manager.

use std::process::Command;

use tracing::debug;

use crate::error::Result;
use crate::exec;

/// Registration and state of units in the user service manager
pub trait ServiceManager {
    /// Make the service manager re-read staged unit files
    fn daemon_reload(&self) -> Result<()>;

    /// Enable for future logins and start now, in one call
    fn enable_now(&self, unit: &str) -> Result<()>;

    /// Disable for future logins and stop now, in one call
    fn disable_now(&self, unit: &str) -> Result<()>;

    /// Stop a unit without touching its enablement
    fn stop(&self, unit: &str) -> Result<()>;

    /// `is-active` state word (`active`, `inactive`, `failed`, ...)
    fn is_active(&self, unit: &str) -> Result<String>;

    /// `is-enabled` state word (`enabled`, `disabled`, `static`, ...)
    fn is_enabled(&self, unit: &str) -> Result<String>;
}

/// Real implementation shelling out to `systemctl --user`
#[derive(Debug, Default)]
pub struct SystemctlManager;

impl SystemctlManager {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let output = exec::run_captured(Command::new("systemctl").arg("--user").args(args))?;
        output.ensure_success()
    }

    fn query(&self, verb: &str, unit: &str) -> Result<String> {
        // is-active and is-enabled exit non-zero for inactive/disabled
        // states; the stdout word is the answer either way
        let output = exec::run_captured(Command::new("systemctl").arg("--user").args([verb, unit]))?;
        let state = output.stdout.trim();
        if state.is_empty() {
            debug!(
                "systemctl {verb} {unit} reported no state: {}",
                output.stderr.trim()
            );
            Ok("unknown".to_string())
        } else {
            Ok(state.to_string())
        }
    }
}

impl ServiceManager for SystemctlManager {
    fn daemon_reload(&self) -> Result<()> {
        self.run(&["daemon-reload"])
    }

    fn enable_now(&self, unit: &str) -> Result<()> {
        self.run(&["enable", "--now", unit])
    }

    fn disable_now(&self, unit: &str) -> Result<()> {
        self.run(&["disable", "--now", unit])
    }

    fn stop(&self, unit: &str) -> Result<()> {
        self.run(&["stop", unit])
    }

    fn is_active(&self, unit: &str) -> Result<String> {
        self.query("is-active", unit)
    }

    fn is_enabled(&self, unit: &str) -> Result<String> {
        self.query("is-enabled", unit)
    }
}
