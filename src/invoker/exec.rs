// ABOUTME: Invoker struct wrapping tokio::process with per-stream capture modes.
// ABOUTME: Distinguishes launch failures from non-zero child exits.

use std::ffi::OsStr;
use std::future::Future;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// How one of the child's output streams is handled.
///
/// Capture buffers the stream entirely in memory for later string
/// conversion; inherit streams it directly to the parent's own stdio,
/// in which case the corresponding `ExecResult` field is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdioMode {
    #[default]
    Capture,
    Inherit,
}

impl StdioMode {
    fn as_stdio(self) -> Stdio {
        match self {
            StdioMode::Capture => Stdio::piped(),
            StdioMode::Inherit => Stdio::inherit(),
        }
    }
}

/// Errors from the invoker itself.
///
/// A child that runs and exits non-zero is NOT an invoker error; that
/// outcome is reported through [`ExecResult::exit_code`].
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error while waiting for `{program}`: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to start blocking runtime: {source}")]
    BlockingRuntime { source: std::io::Error },
}

/// Outcome of one subprocess invocation.
///
/// Capture fields are `None` when the corresponding stream was inherited.
/// `exit_code` is `None` when the child was terminated by a signal.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub stdout: Option<Vec<u8>>,
    pub stderr: Option<Vec<u8>>,
    pub exit_code: Option<i32>,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Captured stdout as a lossy UTF-8 string; empty when inherited.
    pub fn stdout_lossy(&self) -> String {
        match &self.stdout {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => String::new(),
        }
    }

    /// Captured stderr as a lossy UTF-8 string; empty when inherited.
    pub fn stderr_lossy(&self) -> String {
        match &self.stderr {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => String::new(),
        }
    }
}

/// Executes an external program fixed at construction time.
///
/// The two configuration axes of the original design are preserved:
/// capture vs. inherit is selected per stream with [`Invoker::stdout`] /
/// [`Invoker::stderr`], and every invocation is available both
/// asynchronously ([`Invoker::invoke`]) and synchronously
/// ([`Invoker::invoke_blocking`]). The invoker never parses output.
#[derive(Debug, Clone)]
pub struct Invoker {
    program: String,
    stdout: StdioMode,
    stderr: StdioMode,
}

impl Invoker {
    /// Create an invoker for `program` capturing both output streams.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            stdout: StdioMode::Capture,
            stderr: StdioMode::Capture,
        }
    }

    /// Set the handling of the child's stdout.
    pub fn stdout(mut self, mode: StdioMode) -> Self {
        self.stdout = mode;
        self
    }

    /// Set the handling of the child's stderr.
    pub fn stderr(mut self, mode: StdioMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Set the handling of both output streams at once.
    pub fn stdio(self, mode: StdioMode) -> Self {
        self.stdout(mode).stderr(mode)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `args` and await its exit.
    ///
    /// Suspends the calling task without blocking other concurrent work;
    /// multiple invocations may be in flight at once with no ordering
    /// guarantee between their completions. There is no timeout: a hung
    /// child pends this future indefinitely.
    pub async fn invoke<I, S>(&self, args: I) -> Result<ExecResult, InvokeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdout(self.stdout.as_stdio())
            .stderr(self.stderr.as_stdio());

        let child = command.spawn().map_err(|source| InvokeError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| InvokeError::Wait {
                program: self.program.clone(),
                source,
            })?;

        Ok(ExecResult {
            stdout: (self.stdout == StdioMode::Capture).then_some(output.stdout),
            stderr: (self.stderr == StdioMode::Capture).then_some(output.stderr),
            exit_code: output.status.code(),
        })
    }

    /// Blocking adapter over [`Invoker::invoke`].
    ///
    /// Drives the async core on a throwaway current-thread runtime. Must
    /// not be called from within an async context.
    pub fn invoke_blocking<I, S>(&self, args: I) -> Result<ExecResult, InvokeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        block_on(self.invoke(args))?
    }
}

/// Run a future to completion on a fresh current-thread runtime.
///
/// Shared by every `_blocking` adapter in the crate so the synchronous
/// surface stays a thin wrapper over the single async implementation.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, InvokeError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| InvokeError::BlockingRuntime { source })?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_is_the_default_mode() {
        let invoker = Invoker::new("docker");
        assert_eq!(invoker.stdout, StdioMode::Capture);
        assert_eq!(invoker.stderr, StdioMode::Capture);
    }

    #[test]
    fn streams_are_configured_independently() {
        let invoker = Invoker::new("docker").stderr(StdioMode::Inherit);
        assert_eq!(invoker.stdout, StdioMode::Capture);
        assert_eq!(invoker.stderr, StdioMode::Inherit);
    }

    #[test]
    fn stdio_sets_both_streams() {
        let invoker = Invoker::new("docker").stdio(StdioMode::Inherit);
        assert_eq!(invoker.stdout, StdioMode::Inherit);
        assert_eq!(invoker.stderr, StdioMode::Inherit);
    }

    #[test]
    fn success_requires_exit_zero() {
        let ok = ExecResult {
            stdout: Some(Vec::new()),
            stderr: Some(Vec::new()),
            exit_code: Some(0),
        };
        let failed = ExecResult {
            exit_code: Some(1),
            ..ok.clone()
        };
        let signalled = ExecResult {
            exit_code: None,
            ..ok.clone()
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signalled.success());
    }

    #[test]
    fn lossy_accessors_are_empty_when_inherited() {
        let result = ExecResult {
            stdout: None,
            stderr: None,
            exit_code: Some(0),
        };
        assert_eq!(result.stdout_lossy(), "");
        assert_eq!(result.stderr_lossy(), "");
    }
}
