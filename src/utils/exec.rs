//! External command execution utilities.
//!
//! Builder-based API for running a program with optional stdin piping.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Command array from config (e.g. `["gnuplot"]` or `["wsl", "gnuplot"]`)
//! let output = Cmd::from_slice(&config.render.command)
//!     .cwd(script_dir)
//!     .stdin(script)
//!     .output()?;
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    stdin_data: Option<Vec<u8>>,
}

impl Cmd {
    /// Create from a command array (e.g., `["gnuplot"]` or `["wsl", "gnuplot"]`).
    ///
    /// Empty arguments are dropped.
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter
            .map(|s| s.as_ref().to_owned())
            .filter(|arg| !arg.is_empty())
            .collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Program name for error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command and return its output whatever the exit status.
    ///
    /// Only failures to start or talk to the process are errors.
    pub fn output(self) -> Result<Output> {
        let name = self.program_name();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let Some(stdin_data) = self.stdin_data else {
            return cmd
                .stdin(Stdio::null())
                .output()
                .with_context(|| format!("Failed to execute `{name}`"));
        };

        let mut child = cmd
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Feed stdin while stdout/stderr drain, so neither side blocks on a full pipe.
        // Dropping stdin after the write closes the pipe.
        let stdin = child.stdin.take();
        std::thread::scope(|scope| -> Result<Output> {
            let writer = scope.spawn(move || match stdin {
                Some(mut pipe) => pipe.write_all(&stdin_data),
                None => Ok(()),
            });

            let output = child
                .wait_with_output()
                .with_context(|| format!("Failed to wait for `{name}`"))?;

            match writer.join() {
                Ok(Ok(())) => Ok(output),
                // The process quit before reading everything; its output says why
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(output),
                Ok(Err(e)) => Err(e).with_context(|| format!("Failed to write stdin to `{name}`")),
                Err(_) => anyhow::bail!("stdin writer for `{name}` panicked"),
            }
        })
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output.
///
/// Used to reduce noise by skipping known warnings or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to skip.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Lines of `output` that pass the filter, ANSI codes removed.
    pub fn apply(&self, output: &str) -> Vec<String> {
        output
            .lines()
            .map(strip_ansi)
            .filter(|line| !self.should_skip(line.trim()))
            .map(Cow::into_owned)
            .collect()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    match RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").ok()) {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

// ============================================================================
// Tests
// ============================================================================
