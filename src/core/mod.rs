//! Core framework module
//!
//! - Event: emitters, scoped subscriptions and disposable stores

pub mod event;

pub use event::{DisposableStore, Emitter, Subscription};
