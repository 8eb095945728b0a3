// ABOUTME: Typed identifiers for runtime-assigned resources.
// ABOUTME: Prevents raw strings from leaking through the engine API.

mod id;

pub use id::ContainerId;
