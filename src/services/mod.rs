//! Services module containing the flashing session core
//!
//! The invoker assembles and launches esptool, the classifier turns its
//! output into events, and the session controller ties both to the
//! presentation layer.

pub mod classifier;
pub mod invoker;
pub mod session;

pub use classifier::*;
pub use invoker::*;
pub use session::*;
