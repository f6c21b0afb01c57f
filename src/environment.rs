//! Installation environment detection
//!
//! The only environment-sensitive decision in the whole lifecycle is where pip
//! should place the watchdog package. That decision is captured in a proper
//! enum instead of re-checking `VIRTUAL_ENV` at each call site.

use std::ffi::OsStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where pip places the `ln2t_watchdog` package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InstallScope {
    /// An active virtualenv owns the install; pip needs no scope flag
    #[strum(serialize = "isolated")]
    Isolated,
    /// No virtualenv; pip installs into the per-user site directory
    #[default]
    #[strum(serialize = "user")]
    User,
}

impl InstallScope {
    /// Detect the scope from the calling process environment.
    ///
    /// Resolved once at startup and treated as immutable for the rest of the
    /// run, so an operator activating or leaving a virtualenv mid-run cannot
    /// split the procedure across two scopes.
    pub fn detect() -> Self {
        Self::from_virtual_env(std::env::var_os("VIRTUAL_ENV").as_deref())
    }

    /// Scope implied by a `VIRTUAL_ENV` value (side-effect free, for tests)
    pub fn from_virtual_env(virtual_env: Option<&OsStr>) -> Self {
        match virtual_env {
            Some(path) if !path.is_empty() => Self::Isolated,
            _ => Self::User,
        }
    }

    /// Whether pip invocations need the `--user` flag for this scope
    pub fn pip_user_flag(&self) -> bool {
        matches!(self, Self::User)
    }
}
