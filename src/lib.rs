//! ln2t-watchdog-setup library
//!
//! Core functionality for managing the install/uninstall lifecycle of the
//! ln2t-watchdog nightly scheduler: pip-backed package management, systemd
//! user-unit staging, timer registration, and status reporting.

pub mod cli;
pub mod environment;
pub mod error;
pub mod exec;
pub mod lifecycle;
pub mod package_manager;
pub mod paths;
pub mod sanity;
pub mod service_manager;
pub mod status;
pub mod units;

// Re-export main types for convenience
pub use cli::{Cli, Commands};
pub use environment::InstallScope;
pub use error::{Result, SetupError};
pub use lifecycle::{InstallReport, Lifecycle, UninstallReport};
pub use package_manager::{PACKAGE_NAME, PackageManager, PipPackageManager};
pub use paths::{Paths, resolve_package_root};
pub use service_manager::{ServiceManager, SystemctlManager};
pub use status::{StatusReport, UnitStatus};
pub use units::{SERVICE_UNIT, TIMER_UNIT};
