// ABOUTME: Runtime CLI detection for the local system.
// ABOUTME: Probes for a Podman binary first, then Docker.

use super::types::RuntimeType;
use crate::invoker::Invoker;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked for podman and docker CLIs)")]
    NoRuntimeFound,
}

/// Detect a container runtime CLI on the local system.
///
/// Detection order:
/// 1. Podman (`podman --version`)
/// 2. Docker (`docker --version`)
///
/// A candidate counts as available when its binary launches and exits
/// successfully; a missing binary or a failing probe moves on to the
/// next candidate.
pub async fn detect_local() -> Result<RuntimeType, DetectionError> {
    for runtime in [RuntimeType::Podman, RuntimeType::Docker] {
        let probe = Invoker::new(runtime.program());
        match probe.invoke(["--version"]).await {
            Ok(result) if result.success() => return Ok(runtime),
            Ok(result) => {
                tracing::debug!(
                    "{} probe exited with {:?}, trying next candidate",
                    runtime,
                    result.exit_code
                );
            }
            Err(e) => {
                tracing::debug!("{} probe failed to launch: {}", runtime, e);
            }
        }
    }
    Err(DetectionError::NoRuntimeFound)
}
