//! Shell command execution with an optional timeout.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{KitError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Kill the command after this long.
    pub timeout: Option<Duration>,
    /// Capture stdout/stderr instead of inheriting the terminal.
    pub capture_output: bool,
    pub cwd: Option<PathBuf>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            capture_output: true,
            cwd: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed_ms: u64,
}

/// Run `command` through the platform shell (`sh -c` or `cmd /C`).
///
/// A non-zero exit is reported through [`CommandOutput::success`], not as an
/// error. Output is buffered in anonymous temp files so large outputs can't
/// fill a pipe and stall the child.
///
/// # Errors
///
/// `Io` if the shell can't be spawned, `Timeout` if the command outlives
/// `options.timeout` (the child is killed first).
pub fn run_command(command: &str, options: &CommandOptions) -> Result<CommandOutput> {
    let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };

    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command).stdin(Stdio::null());
    if let Some(dir) = &options.cwd {
        cmd.current_dir(dir);
    }

    let capture = if options.capture_output {
        let stdout = tempfile::tempfile()?;
        let stderr = tempfile::tempfile()?;
        cmd.stdout(stdout.try_clone()?).stderr(stderr.try_clone()?);
        Some((stdout, stderr))
    } else {
        None
    };

    debug!(command, timeout = ?options.timeout, "running command");
    let started = Instant::now();
    let mut child = cmd.spawn()?;

    let status = match options.timeout {
        None => child.wait()?,
        Some(limit) => wait_with_timeout(&mut child, limit, command)?,
    };
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (stdout, stderr) = match capture {
        Some((mut out, mut err)) => (read_back(&mut out)?, read_back(&mut err)?),
        None => (String::new(), String::new()),
    };

    Ok(CommandOutput {
        success: status.success(),
        exit_code: status.code(),
        stdout,
        stderr,
        elapsed_ms,
    })
}

fn wait_with_timeout(child: &mut std::process::Child, limit: Duration, command: &str) -> Result<ExitStatus> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // already-exited races are fine to ignore
            let _ = child.kill();
            let _ = child.wait();
            warn!(command, ?limit, "command timed out");
            return Err(KitError::Timeout(format!(
                "command {command:?} exceeded {limit:?}"
            )));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn read_back(file: &mut File) -> Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}
