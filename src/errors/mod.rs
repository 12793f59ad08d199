//! Custom error types for ESPFront

pub mod types;

pub use types::*;
