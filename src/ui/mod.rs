//! Presentation layer abstraction
//!
//! The session core only talks to the `FrontendView` trait; the bundled
//! console implementation lives here and a GUI toolkit can supply its own.

pub mod view;

pub use view::*;
