//! External command execution
//!
//! Every package manager and framework generator call goes through a [`CommandRunner`].
//! The system runner attaches the child to the operator's terminal and always runs
//! in an explicit working directory.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// A single external command, resolved against an explicit directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Failure of an external command; none of these are retried
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "`{command}` failed with exit code {}",
        .code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    )]
    Failed { command: String, code: Option<i32> },

    #[error("`{command}` timed out after {} seconds", .after.as_secs())]
    TimedOut { command: String, after: Duration },
}

/// Starts external processes on behalf of the provisioning steps
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion; a non-zero exit is an error
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError>;
}

/// Runs commands for real, with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

/// The JS tooling ships as `.cmd` shims on Windows
fn platform_program(program: &str) -> String {
    if cfg!(windows) && matches!(program, "npm" | "npx" | "yarn" | "pnpm") {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        let command = invocation.to_string();
        println!();
        println!("{} {}", "Running:".dimmed(), command.yellow());
        println!();

        // kill_on_drop: the child goes away with the future on every exit path
        let mut child = TokioCommand::new(platform_program(&invocation.program))
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        let waited = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(CommandError::TimedOut {
                        command,
                        after: limit,
                    });
                }
            },
            None => child.wait().await,
        };

        let status = waited.map_err(|source| CommandError::Wait {
            command: command.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command,
                code: status.code(),
            })
        }
    }
}
