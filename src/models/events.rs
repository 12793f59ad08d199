//! Application events for communication between components

/// Classified esptool output, produced by the output classifier and consumed
/// by the presentation layer. A chunk is either a progress update or a log
/// line, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubprocessEvent {
    /// Percent-complete extracted from a progress marker. Raw value as
    /// printed by the tool; the session controller clamps it to 0..=100.
    Progress(u32),
    /// A non-progress output chunk, trimmed of surrounding whitespace.
    Log(String),
}

/// Raw subprocess events carried over the session controller's channel.
#[derive(Debug)]
pub enum AppEvent {
    /// Raw output chunk from the tool's merged stdout/stderr stream. Chunks
    /// arrive at arbitrary byte boundaries, not aligned to lines.
    ToolOutput(String),
    /// The tool exited; carries the exit code when the OS reports one.
    ToolExited(Option<i32>),
}

/// Firmware manifest change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestChange {
    /// An entry was appended at this index.
    Added(usize),
    /// Entries were removed; original row indices, highest first.
    Removed(Vec<usize>),
}

/// Flashing session lifecycle state.
///
/// `Idle -> Flashing` only on a successful subprocess start; a start failure
/// stays `Idle`. `Flashing -> Idle` on subprocess exit with any exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Flashing,
}
