#![allow(async_fn_in_trait)]

use std::path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;
use tracing::warn;

/// Exit status git uses for "not a git repository" and other failed preconditions.
pub const PRECONDITION_FAILED_STATUS: i32 = 128;

// -----------------------------------------------------------------------------
// Types

/// Executes an external command and reports how it went.
///
/// Implementations never fail: spawn errors and non-zero exits are both
/// reported through [`CommandOutcome`]. Deciding what is fatal is up to the caller.
pub trait CommandRunner {
    async fn execute(&self, program: &str, args: &[&str]) -> CommandOutcome;
}

/// Combined output and completion status of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Standard output followed by standard error.
    pub output: String,
    /// Exit status, or `None` when the process could not be started or was killed by a signal.
    pub status: Option<i32>,
}

impl CommandOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            status: Some(0),
        }
    }

    pub fn failure(status: i32, output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            status: Some(status),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a failed outcome into an error describing `command`.
    pub fn check(self, command: &str) -> anyhow::Result<String> {
        match self.status {
            Some(0) => Ok(self.output),
            Some(PRECONDITION_FAILED_STATUS) => anyhow::bail!(
                "{} failed with exit status 128 (not a git repository or precondition failed): {}",
                command,
                self.output.trim()
            ),
            Some(code) => anyhow::bail!(
                "{} failed with exit status {}: {}",
                command,
                code,
                self.output.trim()
            ),
            None => anyhow::bail!("{} did not complete: {}", command, self.output.trim()),
        }
    }
}

// -----------------------------------------------------------------------------
// ProcessRunner

/// Runs commands as child processes inside a working directory.
pub struct ProcessRunner {
    path: path::PathBuf,
}

impl ProcessRunner {
    pub fn new(path: path::PathBuf) -> Self {
        Self { path }
    }
}

impl CommandRunner for ProcessRunner {
    async fn execute(&self, program: &str, args: &[&str]) -> CommandOutcome {
        let command_line = format!("{} {}", program, args.join(" "));
        debug!(command = %command_line, "running");

        let result = Command::new(program)
            .current_dir(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                warn!(command = %command_line, error = %e, "failed to start command");
                return CommandOutcome {
                    output: format!("failed to execute {}: {}", program, e),
                    status: None,
                };
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        let outcome = CommandOutcome {
            output: text,
            status: output.status.code(),
        };

        match outcome.status {
            Some(0) => {}
            Some(PRECONDITION_FAILED_STATUS) => warn!(
                command = %command_line,
                "exit status 128: not a git repository or precondition failed"
            ),
            Some(code) => debug!(command = %command_line, code, "command failed"),
            None => debug!(command = %command_line, "command terminated by signal"),
        }

        outcome
    }
}

// -----------------------------------------------------------------------------
// ScriptedRunner

/// Test runner that records every invocation and replies from a script.
#[cfg(test)]
pub(crate) struct ScriptedRunner {
    calls: std::sync::Mutex<Vec<String>>,
    replies: std::sync::Mutex<std::collections::VecDeque<CommandOutcome>>,
}

#[cfg(test)]
impl ScriptedRunner {
    pub(crate) fn new(replies: impl IntoIterator<Item = CommandOutcome>) -> Self {
        Self {
            calls: Default::default(),
            replies: std::sync::Mutex::new(replies.into_iter().collect()),
        }
    }

    /// Command lines seen so far, as `program arg1 arg2 ...`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandRunner for ScriptedRunner {
    async fn execute(&self, program: &str, args: &[&str]) -> CommandOutcome {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CommandOutcome::success(""))
    }
}
