//! Staging and removal of the bundled systemd user units
//!
//! The unit files are opaque to this tool: they are copied verbatim from the
//! package tree and deleted by name. Editing a unit's schedule or exec line
//! never requires a change here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SetupError};

/// Unit started by the timer; runs one watchdog scan
pub const SERVICE_UNIT: &str = "ln2t-watchdog.service";
/// Nightly trigger registered with the user service manager
pub const TIMER_UNIT: &str = "ln2t-watchdog.timer";
/// Subdirectory of the package root holding the bundled templates
pub const TEMPLATE_DIR: &str = "systemd";

/// Both unit names, in staging order
pub const UNITS: [&str; 2] = [SERVICE_UNIT, TIMER_UNIT];

/// Copy both bundled templates into the user unit directory.
///
/// Existing copies are overwritten so a re-run refreshes stale units instead
/// of failing. Returns the staged destination paths.
pub fn stage_units(package_root: &Path, unit_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(unit_dir).map_err(|e| {
        SetupError::general(format!(
            "failed to create unit directory {}: {e}",
            unit_dir.display()
        ))
    })?;

    let template_dir = package_root.join(TEMPLATE_DIR);
    let mut staged = Vec::with_capacity(UNITS.len());
    for unit in UNITS {
        let source = template_dir.join(unit);
        let dest = unit_dir.join(unit);
        fs::copy(&source, &dest).map_err(|e| {
            SetupError::general(format!(
                "failed to stage {} -> {}: {e}",
                source.display(),
                dest.display()
            ))
        })?;
        debug!("staged {} -> {}", source.display(), dest.display());
        staged.push(dest);
    }
    Ok(staged)
}

/// Delete both staged units from the unit directory.
///
/// A unit that is already absent is skipped silently; a deletion that fails
/// for any other reason aborts. Returns the paths actually removed.
pub fn remove_units(unit_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for unit in UNITS {
        let path = unit_dir.join(unit);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} already absent", path.display());
            }
            Err(e) => {
                return Err(SetupError::general(format!(
                    "failed to remove {}: {e}",
                    path.display()
                )));
            }
        }
    }
    Ok(removed)
}

/// Whether a unit's file is currently staged in the unit directory
pub fn unit_staged(unit_dir: &Path, unit: &str) -> bool {
    unit_dir.join(unit).is_file()
}
