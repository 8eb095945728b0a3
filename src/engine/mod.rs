// ABOUTME: Runtime controller over the container CLI.
// ABOUTME: Owns argument translation, the name-to-ID registry, and listing parsers.

mod detection;
mod error;
mod list;
mod options;
mod registry;
mod types;

pub use detection::{DetectionError, detect_local};
pub use error::{EngineError, EngineErrorKind};
pub use list::ContainerSummary;
pub use options::{MemoryUnit, RunOptions};
pub use registry::Registry;
pub use types::{ContainerState, Logs, RuntimeType};

use crate::invoker::{ExecResult, Invoker, StdioMode, block_on};
use crate::types::ContainerId;
use snafu::ResultExt;

/// Drives a container runtime CLI and tracks the containers it started.
///
/// Every operation has an async core and a `_blocking` adapter that runs
/// the same core on a throwaway current-thread runtime. The blocking
/// adapters must not be called from within an async context.
pub struct Engine {
    capture: Invoker,
    inherit: Invoker,
    registry: Registry,
}

impl Engine {
    /// Create an engine for the given runtime's CLI.
    pub fn new(runtime: RuntimeType) -> Self {
        Self::with_program(runtime.program())
    }

    /// Create an engine driving an arbitrary program.
    ///
    /// Intended for nonstandard binary locations; also the seam tests use
    /// to substitute a fake runtime.
    pub fn with_program(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            capture: Invoker::new(program.clone()),
            inherit: Invoker::new(program).stdio(StdioMode::Inherit),
            registry: Registry::default(),
        }
    }

    /// Detect an available runtime CLI and build an engine over it.
    pub async fn detect() -> Result<Self, EngineError> {
        let runtime = detect_local().await.context(error::DetectionSnafu)?;
        Ok(Self::new(runtime))
    }

    /// The program this engine invokes.
    pub fn program(&self) -> &str {
        self.capture.program()
    }

    /// List containers, optionally filtered to one lifecycle state.
    ///
    /// Invokes `ps -a -s [--filter status=<state>] --format {{json .}}`
    /// and parses one summary per line. Malformed lines are skipped with
    /// a warning rather than failing the call. Returns an empty vector
    /// both when the runtime reports no containers and when the
    /// invocation itself could not be started; the latter is logged.
    pub async fn list_containers(
        &self,
        filter: Option<ContainerState>,
    ) -> Vec<ContainerSummary> {
        let mut args: Vec<String> = vec!["ps".into(), "-a".into(), "-s".into()];
        if let Some(state) = filter {
            args.push("--filter".into());
            args.push(format!("status={state}"));
        }
        args.push("--format".into());
        args.push("{{json .}}".into());

        let result = match self.capture.invoke(&args).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("container listing failed: {}", e);
                return Vec::new();
            }
        };

        list::parse_summaries(&result.stdout_lossy())
    }

    /// Blocking adapter over [`Engine::list_containers`].
    pub fn list_containers_blocking(
        &self,
        filter: Option<ContainerState>,
    ) -> Vec<ContainerSummary> {
        match block_on(self.list_containers(filter)) {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!("container listing failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Build an image with `build <options...> <target>`.
    ///
    /// Stdio is inherited: build output is large and interactive, and is
    /// streamed to the caller's terminal rather than captured. A failed
    /// build is not an error here; the returned result carries the exit
    /// code for callers that want to inspect it.
    pub async fn build(
        &self,
        target: &str,
        options: &[&str],
    ) -> Result<ExecResult, EngineError> {
        let mut args: Vec<&str> = vec!["build"];
        args.extend_from_slice(options);
        args.push(target);
        self.inherit.invoke(&args).await.context(error::InvokeSnafu)
    }

    /// Blocking adapter over [`Engine::build`].
    pub fn build_blocking(
        &self,
        target: &str,
        options: &[&str],
    ) -> Result<ExecResult, EngineError> {
        block_on(self.build(target, options)).context(error::InvokeSnafu)?
    }

    /// Start a container in detached mode and track its ID under `name`.
    ///
    /// `name` is the image reference handed to `run -d <flags...> <name>`
    /// and doubles as the registry key; callers are expected to keep it
    /// unique. The runtime prints the new container's ID on stdout;
    /// exactly one trailing line terminator is stripped before the ID is
    /// stored, so embedded formatting is never corrupted. A previous
    /// entry for the same name is unconditionally displaced.
    pub async fn run(
        &self,
        name: &str,
        options: &RunOptions,
    ) -> Result<ContainerId, EngineError> {
        let mut args: Vec<String> = vec!["run".into(), "-d".into()];
        args.extend(options.to_flags());
        args.push(name.into());

        let result = self.capture.invoke(&args).await.context(error::InvokeSnafu)?;
        let stdout = result.stdout_lossy();
        let id = ContainerId::new(trim_line_terminator(&stdout));

        if let Some(previous) = self.registry.insert(name, id.clone()) {
            tracing::debug!("replacing tracked ID for {}: {} -> {}", name, previous, id);
        }
        Ok(id)
    }

    /// Blocking adapter over [`Engine::run`].
    pub fn run_blocking(
        &self,
        name: &str,
        options: &RunOptions,
    ) -> Result<ContainerId, EngineError> {
        block_on(self.run(name, options)).context(error::InvokeSnafu)?
    }

    /// Fetch captured logs for a container started through [`Engine::run`].
    ///
    /// A name with no registry entry returns empty logs immediately,
    /// without invoking the runtime; absence is "nothing to report", not
    /// a failure. Callers that need to distinguish the two should check
    /// [`Engine::tracked_id`] first.
    pub async fn logs(&self, name: &str) -> Result<Logs, EngineError> {
        let Some(id) = self.registry.get(name) else {
            tracing::debug!("no tracked container for {}, returning empty logs", name);
            return Ok(Logs::default());
        };

        let result = self
            .capture
            .invoke(["logs", id.as_str()])
            .await
            .context(error::InvokeSnafu)?;
        Ok(Logs {
            stdout: result.stdout_lossy(),
            stderr: result.stderr_lossy(),
        })
    }

    /// Blocking adapter over [`Engine::logs`].
    pub fn logs_blocking(&self, name: &str) -> Result<Logs, EngineError> {
        block_on(self.logs(name)).context(error::InvokeSnafu)?
    }

    /// Forward arbitrary arguments to the runtime with inherited stdio.
    ///
    /// Escape hatch for operations not otherwise modeled (stop, remove,
    /// inspect, ...). The caller owns argument correctness, and the
    /// child's exit status is not inspected.
    pub async fn raw(&self, args: &[&str]) -> Result<(), EngineError> {
        self.inherit.invoke(args).await.context(error::InvokeSnafu)?;
        Ok(())
    }

    /// Blocking adapter over [`Engine::raw`].
    pub fn raw_blocking(&self, args: &[&str]) -> Result<(), EngineError> {
        block_on(self.raw(args)).context(error::InvokeSnafu)?
    }

    /// The ID tracked for `name`, if any.
    pub fn tracked_id(&self, name: &str) -> Option<ContainerId> {
        self.registry.get(name)
    }

    /// Names of all containers tracked by this engine.
    pub fn tracked_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Drop every tracked name-to-ID entry.
    pub fn clear_tracked(&self) {
        self.registry.clear();
    }
}

/// Strip exactly one trailing line terminator (LF or CRLF).
///
/// The runtime reports a freshly started container's ID as a single
/// newline-terminated token. Stripping arbitrary whitespace instead
/// could corrupt an ID with embedded formatting, so only the final
/// terminator is removed.
fn trim_line_terminator(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}
