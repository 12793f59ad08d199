//! Unit tests for the output classifier: progress extraction, log trimming,
//! and per-chunk mutual exclusivity.

use espfront::models::SubprocessEvent;
use espfront::services::classifier::classify;

#[test]
fn bare_percentage_is_progress() {
    assert_eq!(classify("42 %\n"), Some(SubprocessEvent::Progress(42)));
}

#[test]
fn diagnostic_line_is_a_trimmed_log() {
    assert_eq!(
        classify("Writing at 0x00001000...\n"),
        Some(SubprocessEvent::Log("Writing at 0x00001000...".to_string()))
    );
}

#[test]
fn progress_suppresses_surrounding_text() {
    // A chunk with a marker is never also logged
    assert_eq!(
        classify("Writing at 0x00008000... (12 %)\n"),
        Some(SubprocessEvent::Progress(12))
    );
}

#[test]
fn boundary_values() {
    assert_eq!(classify("0 %"), Some(SubprocessEvent::Progress(0)));
    assert_eq!(classify("100 %"), Some(SubprocessEvent::Progress(100)));
}

#[test]
fn raw_value_is_not_clamped_here() {
    // Clamping happens at the view boundary, not in the classifier
    assert_eq!(classify("1000 %"), Some(SubprocessEvent::Progress(1000)));
}

#[test]
fn percent_without_space_is_not_a_marker() {
    assert_eq!(
        classify("done 42%\n"),
        Some(SubprocessEvent::Log("done 42%".to_string()))
    );
}

#[test]
fn partial_chunk_at_arbitrary_boundary_is_logged() {
    // Pipe reads are not line-aligned; a split word is just a log chunk
    assert_eq!(
        classify("Wri"),
        Some(SubprocessEvent::Log("Wri".to_string()))
    );
}

#[test]
fn multi_line_chunk_with_a_marker_is_a_single_progress_event() {
    let chunk = "Connecting...\nWriting at 0x00001000... (7 %)\n";
    assert_eq!(classify(chunk), Some(SubprocessEvent::Progress(7)));
}

#[test]
fn whitespace_only_chunk_becomes_empty_log() {
    assert_eq!(classify("  \n"), Some(SubprocessEvent::Log(String::new())));
}
