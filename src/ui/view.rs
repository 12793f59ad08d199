//! Toolkit-agnostic view interface and the console implementation

use std::io::Write;

/// What the session core needs from a presentation layer: a progress
/// indicator, an appendable log, enable/disable toggles for the mutating
/// controls, and a way to surface errors.
pub trait FrontendView: Send {
    /// Update the progress indicator, 0..=100.
    fn set_progress(&mut self, percent: u8);

    /// Append one line to the scrolling log (the view keeps it scrolled to
    /// the bottom).
    fn append_log(&mut self, line: &str);

    /// Enable or disable the manifest-mutating and flash-triggering
    /// controls. Disabled for the duration of a flashing session.
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Enable the flash/verify controls only when the manifest is non-empty.
    fn set_flash_enabled(&mut self, enabled: bool);

    /// Show a user-visible error.
    fn show_error(&mut self, message: &str);
}

/// Console rendering of the view: progress as an in-place updating line,
/// log lines printed verbatim, errors to stderr. A terminal has no widgets
/// to grey out, so enablement changes are only logged.
#[derive(Default)]
pub struct ConsoleView {
    progress_line_open: bool,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    fn close_progress_line(&mut self) {
        if self.progress_line_open {
            println!();
            self.progress_line_open = false;
        }
    }
}

impl FrontendView for ConsoleView {
    fn set_progress(&mut self, percent: u8) {
        print!("\r🔥 Flashing... {:>3} %", percent);
        let _ = std::io::stdout().flush();
        self.progress_line_open = true;
        if percent >= 100 {
            self.close_progress_line();
        }
    }

    fn append_log(&mut self, line: &str) {
        self.close_progress_line();
        println!("{}", line);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        log::debug!("Controls enabled: {}", enabled);
    }

    fn set_flash_enabled(&mut self, enabled: bool) {
        log::debug!("Flash controls enabled: {}", enabled);
    }

    fn show_error(&mut self, message: &str) {
        self.close_progress_line();
        eprintln!("❌ {}", message);
    }
}
