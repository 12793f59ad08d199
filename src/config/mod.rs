//! Configuration management for ESPFront

pub mod app_config;

pub use app_config::*;
