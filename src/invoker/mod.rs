// ABOUTME: External-process invocation with configurable stdio capture.
// ABOUTME: One async core per invocation plus a thin blocking adapter.

mod exec;

pub use exec::{ExecResult, Invoker, InvokeError, StdioMode};

pub(crate) use exec::block_on;
