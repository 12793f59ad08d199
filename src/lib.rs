//! ESPFront - esptool.py front-end for ESP32/ESP8266 devices
//!
//! ESPFront drives the external `esptool.py` utility to write firmware images
//! to ESP32/ESP8266 microcontrollers. It manages an ordered manifest of
//! (address, file) pairs, assembles the esptool command line, streams the
//! tool's merged output, and turns it into progress updates and log lines for
//! whatever presentation layer sits on top (the bundled CLI, or a GUI).

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use errors::*;
pub use models::*;

/// ESPFront version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ESPFront application name
pub const APP_NAME: &str = "espfront";
