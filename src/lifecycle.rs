//! Install and uninstall procedures
//!
//! The orchestrator owns step ordering and the fatal/non-fatal split; actual
//! work is delegated to the collaborator traits, so the procedures can be
//! exercised end to end against fakes.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::environment::InstallScope;
use crate::error::Result;
use crate::package_manager::{PACKAGE_NAME, PackageManager};
use crate::paths::Paths;
use crate::service_manager::ServiceManager;
use crate::units::{self, SERVICE_UNIT, TIMER_UNIT};

/// Outcome of a completed install run
#[derive(Debug)]
pub struct InstallReport {
    pub scope: InstallScope,
    pub package_root: PathBuf,
    pub staged_units: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Outcome of a completed uninstall run
#[derive(Debug)]
pub struct UninstallReport {
    /// Non-fatal steps that did not complete, in step order
    pub warnings: Vec<String>,
    pub removed_units: Vec<PathBuf>,
    pub package_removed: bool,
    /// Preserved on purpose; reported so the operator knows where it lives
    pub state_dir: PathBuf,
    pub dry_run: bool,
}

/// Sequential lifecycle procedures over injected collaborators
pub struct Lifecycle<'a> {
    packages: &'a dyn PackageManager,
    services: &'a dyn ServiceManager,
    paths: Paths,
    dry_run: bool,
}

impl<'a> Lifecycle<'a> {
    pub fn new(
        packages: &'a dyn PackageManager,
        services: &'a dyn ServiceManager,
        paths: Paths,
    ) -> Self {
        Self {
            packages,
            services,
            paths,
            dry_run: false,
        }
    }

    /// Announce every mutating step without performing it
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Install the package, stage the units, and arm the timer.
    ///
    /// Steps run strictly in order; the first failure aborts the run and
    /// nothing is rolled back. Re-running after a fix is the recovery path,
    /// and every step tolerates its own work already being done.
    pub fn install(&self, package_root: &Path, scope: InstallScope) -> Result<InstallReport> {
        info!(
            "install: root={}, scope={scope}, dry_run={}",
            package_root.display(),
            self.dry_run
        );

        self.fatal_step(
            &format!("install Python package {PACKAGE_NAME} ({scope} scope)"),
            || self.packages.install(package_root, scope),
        )?;

        let mut staged = Vec::new();
        self.fatal_step(
            &format!("stage unit files into {}", self.paths.unit_dir.display()),
            || {
                staged = units::stage_units(package_root, &self.paths.unit_dir)?;
                Ok(())
            },
        )?;

        self.fatal_step("reload the user service manager", || {
            self.services.daemon_reload()
        })?;

        self.fatal_step(&format!("enable and start {TIMER_UNIT}"), || {
            self.services.enable_now(TIMER_UNIT)
        })?;

        Ok(InstallReport {
            scope,
            package_root: package_root.to_path_buf(),
            staged_units: staged,
            dry_run: self.dry_run,
        })
    }

    /// Tear down everything the installer created.
    ///
    /// Partial or absent state is tolerated everywhere: the service steps and
    /// the package removal degrade to warnings, so a second run (or a run on
    /// a machine that never had the watchdog) still exits cleanly. Only a
    /// failed file deletion or a failed reload aborts. The state directory is
    /// reported and deliberately left untouched.
    pub fn uninstall(&self) -> Result<UninstallReport> {
        info!("uninstall: dry_run={}", self.dry_run);
        let mut warnings = Vec::new();

        self.tolerant_step(
            &mut warnings,
            &format!("disable and stop {TIMER_UNIT}"),
            || self.services.disable_now(TIMER_UNIT),
        );

        self.tolerant_step(&mut warnings, &format!("stop {SERVICE_UNIT}"), || {
            self.services.stop(SERVICE_UNIT)
        });

        let mut removed = Vec::new();
        self.fatal_step(
            &format!("remove staged units from {}", self.paths.unit_dir.display()),
            || {
                removed = units::remove_units(&self.paths.unit_dir)?;
                Ok(())
            },
        )?;

        self.fatal_step("reload the user service manager", || {
            self.services.daemon_reload()
        })?;

        let package_removed = self.tolerant_step(
            &mut warnings,
            &format!("uninstall Python package {PACKAGE_NAME}"),
            || self.packages.uninstall(PACKAGE_NAME),
        );

        Ok(UninstallReport {
            warnings,
            removed_units: removed,
            package_removed,
            state_dir: self.paths.state_dir.clone(),
            dry_run: self.dry_run,
        })
    }

    /// Run one mandatory step, honoring dry-run
    fn fatal_step(&self, description: &str, action: impl FnOnce() -> Result<()>) -> Result<()> {
        if self.dry_run {
            println!("  ⏭  {description} [dry-run]");
            return Ok(());
        }
        match action() {
            Ok(()) => {
                println!("  ✓ {description}");
                Ok(())
            }
            Err(e) => {
                println!("  ✗ {description}");
                Err(e)
            }
        }
    }

    /// Run one best-effort step; failure becomes a recorded warning.
    /// Returns whether the step actually completed.
    fn tolerant_step(
        &self,
        warnings: &mut Vec<String>,
        description: &str,
        action: impl FnOnce() -> Result<()>,
    ) -> bool {
        if self.dry_run {
            println!("  ⏭  {description} [dry-run]");
            return false;
        }
        match action() {
            Ok(()) => {
                println!("  ✓ {description}");
                true
            }
            Err(e) => {
                warn!("{description}: {e}");
                println!("  ⚠ {description} (already absent or unavailable)");
                warnings.push(format!("{description}: {e}"));
                false
            }
        }
    }
}
