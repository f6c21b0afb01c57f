//! Filesystem locations used by the lifecycle procedures
//!
//! Everything location-sensitive is resolved once into a `Paths` value so the
//! orchestration layer never touches environment variables, and tests can run
//! against temporary trees.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SetupError};
use crate::units::{SERVICE_UNIT, TEMPLATE_DIR, TIMER_UNIT};

/// Name of the watchdog's persisted state directory under the XDG state home.
/// Matches the Python distribution name; the watchdog derives the path from it.
pub const STATE_DIR_NAME: &str = "ln2t_watchdog";

/// Resolved filesystem locations for one lifecycle run
#[derive(Debug, Clone)]
pub struct Paths {
    /// Directory systemd scans for user units (`~/.config/systemd/user`)
    pub unit_dir: PathBuf,
    /// Watchdog-owned run history and last-run marker; reported, never touched
    pub state_dir: PathBuf,
}

impl Paths {
    /// Resolve from the XDG base directories of the calling user
    pub fn resolve() -> Result<Self> {
        let config_home = dirs::config_dir().ok_or(SetupError::NoHome)?;
        let state_home = match dirs::state_dir() {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(SetupError::NoHome)?
                .join(".local")
                .join("state"),
        };
        Ok(Self::under(&config_home, &state_home))
    }

    /// Build from explicit base directories (tests point this at temp trees)
    pub fn under(config_home: &Path, state_home: &Path) -> Self {
        Self {
            unit_dir: config_home.join("systemd").join("user"),
            state_dir: state_home.join(STATE_DIR_NAME),
        }
    }
}

/// Locate the package root for an install run.
///
/// An explicit `--package-dir` wins and is validated. Otherwise the search
/// walks up from the running executable, so the install works no matter what
/// directory the operator happens to be in.
pub fn resolve_package_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if is_package_root(dir) {
            debug!("package root (explicit): {}", dir.display());
            return Ok(dir.to_path_buf());
        }
        return Err(SetupError::package_root(format!(
            "{} does not contain {TEMPLATE_DIR}/{SERVICE_UNIT} and {TEMPLATE_DIR}/{TIMER_UNIT}",
            dir.display()
        )));
    }

    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    match search_upwards(&exe) {
        Some(root) => {
            debug!("package root (discovered): {}", root.display());
            Ok(root)
        }
        None => Err(SetupError::package_root(format!(
            "no {TEMPLATE_DIR}/ templates found above {}; pass --package-dir",
            exe.display()
        ))),
    }
}

/// True when `dir` holds the bundled unit templates
fn is_package_root(dir: &Path) -> bool {
    let templates = dir.join(TEMPLATE_DIR);
    templates.join(SERVICE_UNIT).is_file() && templates.join(TIMER_UNIT).is_file()
}

/// Walk from `start` toward the filesystem root looking for the template dir
fn search_upwards(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_package_root(dir))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fake_package_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let templates = root.path().join(TEMPLATE_DIR);
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join(SERVICE_UNIT), "[Unit]\n").unwrap();
        fs::write(templates.join(TIMER_UNIT), "[Unit]\n").unwrap();
        root
    }

    #[test]
    fn test_under_joins_the_conventional_subpaths() {
        let paths = Paths::under(Path::new("/home/alice/.config"), Path::new("/home/alice/.local/state"));
        assert_eq!(
            paths.unit_dir,
            PathBuf::from("/home/alice/.config/systemd/user")
        );
        assert_eq!(
            paths.state_dir,
            PathBuf::from("/home/alice/.local/state/ln2t_watchdog")
        );
    }

    #[test]
    fn test_explicit_package_dir_is_validated() {
        let root = fake_package_root();
        let found = resolve_package_root(Some(root.path())).unwrap();
        assert_eq!(found, root.path());

        let empty = tempfile::tempdir().unwrap();
        let err = resolve_package_root(Some(empty.path())).unwrap_err();
        assert!(err.to_string().contains("package root not found"));
    }

    #[test]
    fn test_search_walks_up_from_nested_binaries() {
        let root = fake_package_root();
        let nested = root.path().join("target").join("release");
        fs::create_dir_all(&nested).unwrap();
        let exe = nested.join("ln2t-watchdog-setup");
        fs::write(&exe, b"").unwrap();

        let found = search_upwards(&exe).unwrap();
        assert_eq!(found, root.path());
    }

    #[test]
    fn test_search_gives_up_outside_a_package_tree() {
        let plain = tempfile::tempdir().unwrap();
        let exe = plain.path().join("bin").join("tool");
        fs::create_dir_all(exe.parent().unwrap()).unwrap();
        fs::write(&exe, b"").unwrap();

        assert!(search_upwards(&exe).is_none());
    }

    #[test]
    fn test_missing_one_template_is_not_a_root() {
        let root = tempfile::tempdir().unwrap();
        let templates = root.path().join(TEMPLATE_DIR);
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join(TIMER_UNIT), "[Unit]\n").unwrap();

        assert!(resolve_package_root(Some(root.path())).is_err());
    }
}
