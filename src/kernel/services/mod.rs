//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used by the controller.
//! - `adapters`: runtime specific implementations (async, settings IO).

pub mod adapters;
pub mod ports;
