//! Utility functions and helpers used throughout ESPFront

pub mod logging;
pub mod ports;
