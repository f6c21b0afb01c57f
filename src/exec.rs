//! Shared process execution for the external collaborators
//!
//! Both collaborators (pip and systemctl) run through these helpers so spawn
//! failures, exit-status checks, and diagnostic logging behave identically
//! everywhere a child process is involved.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, SetupError};

/// Output from a completed child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command as it was invoked, for messages and logs
    pub command: String,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
    /// Whether the child exited with status 0
    pub success: bool,
}

impl CommandOutput {
    /// Turn a non-zero exit into an error carrying the child's exit code.
    pub fn ensure_success(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(SetupError::command(
                &self.command,
                self.exit_code.unwrap_or(1),
                self.stderr.trim(),
            ))
        }
    }
}

/// Run a command to completion with captured output.
///
/// Only a spawn failure is an error here; callers judge the exit status
/// themselves, because for queries like `systemctl is-active` a non-zero
/// exit still carries the answer on stdout.
pub fn run_captured(cmd: &mut Command) -> Result<CommandOutput> {
    let rendered = render(cmd);
    debug!("running: {rendered}");

    let output = cmd
        .output()
        .map_err(|e| SetupError::launch(&rendered, e))?;

    let result = CommandOutput {
        command: rendered,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
        success: output.status.success(),
    };
    debug!(
        "finished: {} (status {:?})",
        result.command, result.exit_code
    );
    Ok(result)
}

/// Run a command with inherited stdio so the operator sees live progress.
///
/// Used for the pip install, which can download for minutes; a non-zero exit
/// is an error because streamed commands are always mutation steps.
pub fn run_streamed(cmd: &mut Command) -> Result<()> {
    let rendered = render(cmd);
    debug!("running (streamed): {rendered}");

    let status = cmd
        .status()
        .map_err(|e| SetupError::launch(&rendered, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(SetupError::command(
            &rendered,
            status.code().unwrap_or(1),
            "output shown above",
        ))
    }
}

/// Render a command as `program arg1 arg2 ...` for messages and logs
fn render(cmd: &Command) -> String {
    let mut rendered = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_on_success() {
        let output = run_captured(Command::new("sh").args(["-c", "echo hello"])).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.ensure_success().is_ok());
    }

    #[test]
    fn test_nonzero_exit_is_reported_not_raised() {
        let output = run_captured(Command::new("sh").args(["-c", "echo oops >&2; exit 3"])).unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));

        let err = output.ensure_success().unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_missing_binary_is_a_launch_error() {
        let err = run_captured(&mut Command::new("definitely-not-a-real-binary-7c1f")).unwrap_err();
        assert!(matches!(err, SetupError::Launch { .. }));
    }

    #[test]
    fn test_render_includes_arguments() {
        let mut cmd = Command::new("systemctl");
        cmd.args(["--user", "daemon-reload"]);
        assert_eq!(render(&cmd), "systemctl --user daemon-reload");
    }
}
