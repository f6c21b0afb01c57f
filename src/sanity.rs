//! Pre-flight checks for the install procedure
//!
//! Verifies the collaborator binaries exist before any mutation happens, so a
//! half-provisioned machine fails with one clear message instead of stopping
//! partway through the procedure.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, SetupError};

/// Binaries every install run spawns
const REQUIRED_BINARIES: &[&str] = &["systemctl", "python3"];

/// Result of environment verification
#[derive(Debug)]
pub struct PreflightReport {
    pub missing_binaries: Vec<String>,
}

impl PreflightReport {
    /// Returns true if all checks passed
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty()
    }
}

/// Check if a binary is available in PATH
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Look for every binary the install procedure spawns
pub fn verify_environment() -> PreflightReport {
    let mut missing = Vec::new();

    for binary in REQUIRED_BINARIES {
        if binary_exists(binary) {
            debug!("preflight: {binary} present");
        } else {
            missing.push((*binary).to_string());
        }
    }

    PreflightReport {
        missing_binaries: missing,
    }
}

/// Verify the environment and turn any gap into a fatal error.
///
/// Runs before the first mutation of an install; uninstall deliberately skips
/// it, because a machine stripped of python3 must still be able to finish an
/// uninstall.
pub fn run_preflight_checks() -> Result<()> {
    let report = verify_environment();
    if report.is_ok() {
        debug!("preflight checks passed");
        Ok(())
    } else {
        Err(SetupError::preflight(report.missing_binaries.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_exists_sh() {
        // sh is in every POSIX environment this tool targets
        assert!(binary_exists("sh"), "sh should be available");
    }

    #[test]
    fn test_binary_exists_nonexistent() {
        assert!(!binary_exists("this_binary_definitely_does_not_exist_12345"));
    }

    #[test]
    fn test_preflight_report_is_ok() {
        let ok = PreflightReport {
            missing_binaries: vec![],
        };
        assert!(ok.is_ok());

        let missing = PreflightReport {
            missing_binaries: vec!["python3".to_string()],
        };
        assert!(!missing.is_ok());
    }
}
