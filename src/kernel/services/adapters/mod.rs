//! Service adapters: runtime specific implementations (async, settings IO).

pub mod filter;
pub mod runtime;
pub mod settings;

pub use filter::PrefixFilter;
pub use runtime::{SuggestRuntime, TokioExecutor};
pub use settings::load_suggest_config;
