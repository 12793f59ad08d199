//! Classification of raw esptool output chunks
//!
//! esptool prints progress as lines containing "<digits> %" and everything
//! else as plain diagnostics. Chunks arrive at arbitrary byte boundaries, so
//! the classifier matches the marker anywhere in the chunk and never assumes
//! line alignment.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::SubprocessEvent;

fn progress_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(\d+) %").expect("progress marker pattern is valid"))
}

/// Classify one output chunk as either a progress update or a log line.
///
/// A chunk containing a progress marker is never also logged; the two event
/// kinds are mutually exclusive per chunk. Non-progress text sharing a chunk
/// with a marker is dropped, matching the line-buffered behavior of the
/// esptool output this was built against. Returns `None` only in the
/// defensive case where the matched digits fail to parse.
pub fn classify(chunk: &str) -> Option<SubprocessEvent> {
    if let Some(captures) = progress_marker().captures(chunk) {
        return match captures[1].parse::<u32>() {
            Ok(percent) => Some(SubprocessEvent::Progress(percent)),
            // Unreachable given the pattern, but a bad parse must not
            // surface as a log line either
            Err(_) => None,
        };
    }

    Some(SubprocessEvent::Log(chunk.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_marker_wins_over_surrounding_text() {
        let event = classify("Writing at 0x00008000... (12 %)\n").unwrap();
        assert_eq!(event, SubprocessEvent::Progress(12));
    }

    #[test]
    fn plain_text_becomes_trimmed_log() {
        let event = classify("  Connecting...\n").unwrap();
        assert_eq!(event, SubprocessEvent::Log("Connecting...".to_string()));
    }
}
