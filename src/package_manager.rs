//! pip-backed package management
//!
//! The watchdog application is a Python distribution; installing and removing
//! it is delegated to pip behind a narrow trait so the lifecycle procedures
//! can be exercised against fakes.
//!
//! Argument vectors are built by pure functions, keeping the scope branch
//! (`--user` or not) testable without spawning anything.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::environment::InstallScope;
use crate::error::Result;
use crate::exec;

/// Python distribution name of the watchdog application
pub const PACKAGE_NAME: &str = "ln2t_watchdog";

/// Interpreter used for every pip invocation
pub const PYTHON: &str = "python3";

/// Installing and removing the watchdog package
pub trait PackageManager {
    /// Install the package from a source tree, honoring the resolved scope
    fn install(&self, package_root: &Path, scope: InstallScope) -> Result<()>;

    /// Remove the package by name
    fn uninstall(&self, name: &str) -> Result<()>;

    /// Whether pip currently has the package installed
    fn is_installed(&self, name: &str) -> Result<bool>;
}

/// Real implementation shelling out to `python3 -m pip`
#[derive(Debug, Default)]
pub struct PipPackageManager;

impl PipPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for PipPackageManager {
    fn install(&self, package_root: &Path, scope: InstallScope) -> Result<()> {
        info!(
            "installing {PACKAGE_NAME} from {} ({scope} scope)",
            package_root.display()
        );
        // Streamed so the operator watches pip resolve and build live
        exec::run_streamed(Command::new(PYTHON).args(pip_install_args(package_root, scope)))
    }

    fn uninstall(&self, name: &str) -> Result<()> {
        let output = exec::run_captured(Command::new(PYTHON).args(pip_uninstall_args(name)))?;
        output.ensure_success()?;
        debug!("pip uninstall: {}", output.stdout.trim());
        Ok(())
    }

    fn is_installed(&self, name: &str) -> Result<bool> {
        let output =
            exec::run_captured(Command::new(PYTHON).args(["-m", "pip", "show", "--quiet", name]))?;
        Ok(output.success)
    }
}

/// Arguments for `python3` that install the package at the given scope.
///
/// `Isolated` relies on the active virtualenv owning the site directory;
/// `User` adds `--user` so pip targets the per-user site directory instead
/// of attempting a system-wide install.
pub fn pip_install_args(package_root: &Path, scope: InstallScope) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-m".into(), "pip".into(), "install".into()];
    if scope.pip_user_flag() {
        args.push("--user".into());
    }
    args.push(package_root.as_os_str().to_os_string());
    args
}

/// Arguments for `python3` that remove the named package without prompting
pub fn pip_uninstall_args(name: &str) -> Vec<OsString> {
    vec![
        "-m".into(),
        "pip".into(),
        "uninstall".into(),
        "--yes".into(),
        name.into(),
    ]
}
