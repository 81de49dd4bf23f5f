//! Runs the single external process each operation needs.
//!
//! Platform code only describes *what* to run as a [`Command`]; a
//! [`CommandRunner`] decides how. [`SystemRunner`] spawns real processes,
//! while tests substitute runners that record invocations and replay canned
//! output.
use crate::error::{Error, Result};
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A fully-specified external command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Upper bound on how long to wait for the process. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Command {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Executes a [`Command`] and returns its standard output.
pub trait CommandRunner {
    /// Runs the command to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandExecution`] if the process cannot be spawned or exits
    ///   with a non-zero status.
    /// - [`Error::Timeout`] if the command's timeout elapses first.
    fn run(&self, command: &Command) -> impl Future<Output = Result<String>>;
}

/// Spawns real child processes with `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &Command) -> Result<String> {
        debug!(
            program = %command.program.display(),
            args = ?command.args,
            timeout = ?command.timeout,
            "spawning command"
        );

        let mut process = tokio::process::Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            // A timed-out process is killed when its future is dropped.
            .kill_on_drop(true);
        #[cfg(windows)]
        process.creation_flags(CREATE_NO_WINDOW);

        let output = match command.timeout {
            Some(after) => tokio::time::timeout(after, process.output())
                .await
                .map_err(|_| Error::Timeout {
                    program: command.program_name(),
                    after,
                })?,
            None => process.output().await,
        }
        .map_err(|e| Error::CommandExecution {
            program: command.program_name(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                message => message.to_string(),
            };
            return Err(Error::CommandExecution {
                program: command.program_name(),
                reason,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
