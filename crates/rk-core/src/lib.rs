//! rk-core: stable foundation for rkflow.
//!
//! Contains:
//! - vector (dense fixed-length state container + checked arithmetic)
//! - numeric (Real + tolerances + float helpers)
//! - timing (opt-in wall-clock timers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod vector;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use vector::Vector;
