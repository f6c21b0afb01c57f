//! Lifecycle status reporting
//!
//! Read-only snapshot of everything the installer manages: staged unit files,
//! service-manager state, package installation, and the watchdog's state
//! directory. Every query degrades instead of aborting, so the report can be
//! assembled on a machine in any condition, including one with no user
//! service manager at all.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::environment::InstallScope;
use crate::error::Result;
use crate::package_manager::{PACKAGE_NAME, PackageManager};
use crate::paths::Paths;
use crate::service_manager::ServiceManager;
use crate::units::{self, SERVICE_UNIT, TIMER_UNIT};

/// State of one managed unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitStatus {
    pub name: String,
    /// Unit file present in the user unit directory
    pub staged: bool,
    /// `is-active` state word, `unknown` when the query failed
    pub active: String,
    /// `is-enabled` state word, `unknown` when the query failed
    pub enabled: String,
}

/// Snapshot of everything the lifecycle manages
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub scope: InstallScope,
    pub package: String,
    /// None when pip could not be queried at all
    pub package_installed: Option<bool>,
    pub units: Vec<UnitStatus>,
    pub unit_dir: PathBuf,
    pub state_dir: PathBuf,
    pub state_dir_exists: bool,
}

/// Assemble the snapshot. Nothing is mutated; failed queries become
/// `unknown`/`None` fields rather than errors.
pub fn collect(
    packages: &dyn PackageManager,
    services: &dyn ServiceManager,
    paths: &Paths,
    scope: InstallScope,
) -> StatusReport {
    let units = [SERVICE_UNIT, TIMER_UNIT]
        .into_iter()
        .map(|unit| UnitStatus {
            name: unit.to_string(),
            staged: units::unit_staged(&paths.unit_dir, unit),
            active: state_or_unknown(services.is_active(unit), unit, "is-active"),
            enabled: state_or_unknown(services.is_enabled(unit), unit, "is-enabled"),
        })
        .collect();

    let package_installed = match packages.is_installed(PACKAGE_NAME) {
        Ok(installed) => Some(installed),
        Err(e) => {
            debug!("pip query failed: {e}");
            None
        }
    };

    StatusReport {
        scope,
        package: PACKAGE_NAME.to_string(),
        package_installed,
        units,
        unit_dir: paths.unit_dir.clone(),
        state_dir: paths.state_dir.clone(),
        state_dir_exists: paths.state_dir.is_dir(),
    }
}

fn state_or_unknown(result: Result<String>, unit: &str, verb: &str) -> String {
    result.unwrap_or_else(|e| {
        debug!("{verb} {unit} failed: {e}");
        "unknown".to_string()
    })
}

impl StatusReport {
    /// Human-readable rendering for the default `status` output
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "ln2t-watchdog lifecycle status ({} scope)\n\n",
            self.scope
        ));

        let installed = match self.package_installed {
            Some(true) => "installed",
            Some(false) => "not installed",
            None => "unknown (pip unavailable)",
        };
        out.push_str(&format!("  package {:<24} {}\n", self.package, installed));

        for unit in &self.units {
            let staged = if unit.staged { "staged" } else { "not staged" };
            out.push_str(&format!(
                "  {:<32} {}, {}, {}\n",
                unit.name, staged, unit.active, unit.enabled
            ));
        }

        out.push_str(&format!(
            "\n  unit dir:  {}\n  state dir: {} ({})\n",
            self.unit_dir.display(),
            self.state_dir.display(),
            if self.state_dir_exists {
                "present"
            } else {
                "absent"
            }
        ));
        out
    }

    /// JSON rendering for `status --json`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
