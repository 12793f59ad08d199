//! Data models and types used throughout ESPFront

pub mod events;
pub mod manifest;
pub mod options;

// Re-export commonly used types
pub use events::*;
pub use manifest::*;
pub use options::*;
