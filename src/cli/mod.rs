//! Command line interface for ESPFront

pub mod args;
pub mod commands;
