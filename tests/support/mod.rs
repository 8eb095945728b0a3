// ABOUTME: Test support utilities.
// ABOUTME: Provides a scriptable fake runtime CLI for integration tests.

use std::path::Path;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("wharf=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A scriptable stand-in for the container runtime CLI.
///
/// Writes a shell script into a tempdir and points the engine at it.
/// Every invocation appends its space-joined argument list to a call
/// log, then runs `body`. The body can branch on `$1` to emulate the
/// runtime's subcommands and may keep state under `$STATE_DIR`.
pub struct FakeRuntime {
    dir: tempfile::TempDir,
    calls: std::path::PathBuf,
}

#[allow(dead_code)]
impl FakeRuntime {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let calls = dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\n\
             STATE_DIR=\"{state}\"\n\
             printf '%s\\n' \"$*\" >> \"{calls}\"\n\
             {body}\n",
            state = dir.path().display(),
            calls = calls.display(),
        );
        let program = dir.path().join("fake-runtime");
        std::fs::write(&program, script).expect("write fake runtime script");
        make_executable(&program);
        Self { dir, calls }
    }

    /// Path to the fake runtime binary, for `Engine::with_program`.
    pub fn program(&self) -> String {
        self.dir
            .path()
            .join("fake-runtime")
            .to_str()
            .expect("tempdir path is UTF-8")
            .to_string()
    }

    /// One entry per invocation: the space-joined argument list.
    pub fn calls(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.calls) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)
        .expect("stat fake runtime script")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).expect("chmod fake runtime script");
}
