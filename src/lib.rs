//! zcode-suggest - suggestion trigger orchestration for the zcode editor
//!
//! Module layout:
//! - core: framework plumbing (event emitters, scoped subscriptions)
//! - models: value types (Position, DocumentSnapshot, Word)
//! - kernel: trigger state machine, trigger-character index, quick suggest, controller
//! - logging: tracing subscriber setup

pub mod core;
pub mod kernel;
pub mod logging;
pub mod models;
