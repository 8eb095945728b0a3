// ABOUTME: Engine error types with SNAFU pattern.
// ABOUTME: Unifies detection and invocation errors for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;
use crate::invoker::InvokeError;

/// Unified engine error for detection and invocation failures.
///
/// Non-zero child exits never appear here: the engine is fail-soft and
/// reports them through `ExecResult::exit_code` only.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EngineError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("runtime invocation failed: {source}"))]
    Invoke { source: InvokeError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// No container runtime CLI found on the system.
    NoRuntimeFound,
    /// The runtime binary could not be launched at all.
    LaunchFailed,
    /// I/O failure while waiting on a launched child.
    Io,
    /// A `_blocking` adapter could not start its runtime.
    BlockingRuntime,
}

impl EngineError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => EngineErrorKind::NoRuntimeFound,
            },
            EngineError::Invoke { source } => match source {
                InvokeError::Spawn { .. } => EngineErrorKind::LaunchFailed,
                InvokeError::Wait { .. } => EngineErrorKind::Io,
                InvokeError::BlockingRuntime { .. } => EngineErrorKind::BlockingRuntime,
            },
        }
    }
}

impl From<DetectionError> for EngineError {
    fn from(source: DetectionError) -> Self {
        EngineError::Detection { source }
    }
}

impl From<InvokeError> for EngineError {
    fn from(source: InvokeError) -> Self {
        EngineError::Invoke { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_failures_map_to_their_kind() {
        let error = EngineError::from(InvokeError::Spawn {
            program: "docker".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(error.kind(), EngineErrorKind::LaunchFailed);
    }

    #[test]
    fn detection_failures_map_to_their_kind() {
        let error = EngineError::from(DetectionError::NoRuntimeFound);
        assert_eq!(error.kind(), EngineErrorKind::NoRuntimeFound);
    }
}
