//! External command execution.
//!
//! Every shell-out in the tool goes through [`Runner`], which echoes the
//! command line in debug mode and turns any non-zero exit into a fatal
//! [`CaError::CommandFailed`] carrying the captured output.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{CaError, Result};

/// Runs external commands for the CA bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    debug: bool,
}

impl Runner {
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command to completion.
    ///
    /// In debug mode the child inherits stdio so its output streams live; the
    /// failure error then carries no captured text since it is already on the
    /// terminal. Otherwise output is captured and only surfaces on failure.
    pub fn run(&self, cmd: &mut Command) -> Result<()> {
        let line = render_command(cmd);
        debug!(command = %line, "spawning");

        if self.debug {
            eprintln!("[debug] {line}");
            let status = cmd.status().map_err(|e| spawn_error(&line, &e))?;
            if status.success() {
                return Ok(());
            }
            return Err(CaError::CommandFailed {
                command: line,
                output: String::new(),
            });
        }

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&line, &e))?;
        if output.status.success() {
            return Ok(());
        }

        Err(CaError::CommandFailed {
            command: line,
            output: combined(&output.stdout, &output.stderr),
        })
    }

    /// Run a command, returning its success flag and combined output instead
    /// of failing on a non-zero exit. Used by probes and by the BKS export,
    /// which downgrades known provider errors to a warning.
    pub fn capture(&self, cmd: &mut Command) -> Result<(bool, String)> {
        let line = render_command(cmd);
        debug!(command = %line, "spawning");
        if self.debug {
            eprintln!("[debug] {line}");
        }

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&line, &e))?;
        Ok((
            output.status.success(),
            combined(&output.stdout, &output.stderr),
        ))
    }
}

fn combined(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(stderr));
    text.trim().to_string()
}

fn spawn_error(line: &str, err: &std::io::Error) -> CaError {
    let program = line.split_whitespace().next().unwrap_or(line).to_string();
    if err.kind() == std::io::ErrorKind::NotFound {
        CaError::ToolMissing {
            tool: program,
            hint: "make sure it is installed and on your PATH".to_string(),
        }
    } else {
        CaError::CommandFailed {
            command: line.to_string(),
            output: err.to_string(),
        }
    }
}

pub(crate) fn render_command(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_maps_to_tool_missing() {
        let runner = Runner::new(false);
        let err = runner
            .run(&mut Command::new("certmill-no-such-binary"))
            .unwrap_err();
        assert!(err.is_missing_tool(), "got {err}");
    }

    #[test]
    fn render_includes_arguments() {
        let mut cmd = Command::new("openssl");
        cmd.args(["req", "-batch"]);
        assert_eq!(render_command(&cmd), "openssl req -batch");
    }

    #[cfg(unix)]
    #[test]
    fn failed_command_carries_output() {
        let runner = Runner::new(false);
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo boom; exit 3"]);
        let err = runner.run(&mut cmd).unwrap_err();
        match err {
            CaError::CommandFailed { output, .. } => assert!(output.contains("boom")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn capture_reports_success_without_failing() {
        let runner = Runner::new(false);
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo fine"]);
        let (ok, output) = runner.capture(&mut cmd).unwrap();
        assert!(ok);
        assert!(output.contains("fine"));
    }
}
