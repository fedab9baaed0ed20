//! Async runtime adapter: runs fetch tasks that report back to the controller.

mod runtime;

pub use runtime::{SuggestRuntime, TokioExecutor};
