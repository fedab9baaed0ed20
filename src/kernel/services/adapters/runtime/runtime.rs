use std::io;
use std::sync::Arc;

use crate::kernel::services::ports::{AsyncExecutor, BoxFuture};

/// Executor backed by a tokio runtime handle.
#[derive(Clone)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

impl TokioExecutor {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl AsyncExecutor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.handle.spawn(task);
    }
}

/// Owns the runtime that suggestion fetches run on.
pub struct SuggestRuntime {
    runtime: tokio::runtime::Runtime,
}

impl SuggestRuntime {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("suggest-fetch")
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn executor(&self) -> Arc<dyn AsyncExecutor> {
        Arc::new(TokioExecutor::new(self.tokio_handle()))
    }
}
