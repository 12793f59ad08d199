//! Session controller tests with a recording view: state transitions,
//! control enablement, progress clamping, and full sessions against a fake
//! flashing tool.

use std::path::PathBuf;

use espfront::models::{AppEvent, FlashMode, FlashOptions, SessionState};
use espfront::services::session::SessionController;
use espfront::ui::FrontendView;

/// View that records every call so tests can assert on the exact sequence
/// of UI effects.
#[derive(Default)]
struct RecordingView {
    progress: Vec<u8>,
    log: Vec<String>,
    controls: Vec<bool>,
    flash_enabled: Vec<bool>,
    errors: Vec<String>,
}

impl FrontendView for RecordingView {
    fn set_progress(&mut self, percent: u8) {
        self.progress.push(percent);
    }

    fn append_log(&mut self, line: &str) {
        self.log.push(line.to_string());
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls.push(enabled);
    }

    fn set_flash_enabled(&mut self, enabled: bool) {
        self.flash_enabled.push(enabled);
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn controller_with_tool(tool: PathBuf) -> SessionController<RecordingView> {
    SessionController::new(RecordingView::default(), tool)
}

fn options_for(port: &str) -> FlashOptions {
    FlashOptions {
        serial_port: port.to_string(),
        flash_mode: FlashMode::Dio,
        flash_size: "detect".to_string(),
        flash_freq: "40m".to_string(),
        compression: true,
    }
}

#[test]
fn adding_firmware_enables_flash_controls() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));

    controller.add_firmware("0x1000", "/a.bin").unwrap();
    assert_eq!(controller.view().flash_enabled, vec![true]);

    controller.remove_firmware(&[0]).unwrap();
    assert_eq!(controller.view().flash_enabled, vec![true, false]);
    assert_eq!(controller.manifest().count(), 0);
}

#[tokio::test]
async fn start_failure_surfaces_error_and_stays_idle() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));
    controller.add_firmware("0x00", "/fw.bin").unwrap();

    let result = controller.start_flashing(&options_for("COM3"));

    assert!(result.is_err());
    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(controller.view().errors.len(), 1);
    // Controls were never disabled, so the user can keep editing
    assert!(controller.view().controls.is_empty());
    controller.add_firmware("0x8000", "/more.bin").unwrap();
}

#[test]
fn flashing_an_empty_manifest_is_rejected() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));
    assert!(controller.start_flashing(&options_for("COM3")).is_err());
    assert_eq!(controller.state(), SessionState::Idle);
}

#[test]
fn progress_events_are_clamped_at_the_view() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));

    controller.handle_event(AppEvent::ToolOutput("42 %\n".to_string()));
    controller.handle_event(AppEvent::ToolOutput("250 %\n".to_string()));
    controller.handle_event(AppEvent::ToolOutput("Writing at 0x00001000...\n".to_string()));

    assert_eq!(controller.view().progress, vec![42, 100]);
    assert_eq!(controller.view().log, vec!["Writing at 0x00001000..."]);
}

#[test]
fn exit_event_reenables_controls_regardless_of_code() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));

    controller.handle_event(AppEvent::ToolExited(Some(2)));

    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(controller.view().controls, vec![true]);
    assert_eq!(controller.last_exit_code(), Some(2));
}

#[tokio::test]
async fn query_info_with_no_selection_is_a_benign_error() {
    let mut controller = controller_with_tool(PathBuf::from("/nonexistent/esptool.py"));
    assert!(controller.query_info("").await.is_err());
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_fake_tool(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake-esptool.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn full_session_drives_progress_log_and_enablement() {
        let dir = TempDir::new().unwrap();
        let tool = write_fake_tool(
            &dir,
            "echo 'Connecting...'\n\
             sleep 0.2\n\
             echo 'Writing at 0x00001000... (50 %)'\n\
             sleep 0.2\n\
             echo '100 %'\n\
             exit 0",
        );

        let mut controller = controller_with_tool(tool);
        controller.add_firmware("0x1000", "/a.bin").unwrap();

        controller.start_flashing(&options_for("/dev/ttyUSB0")).unwrap();
        assert_eq!(controller.state(), SessionState::Flashing);

        controller.run_to_completion().await.unwrap();

        let view = controller.view();
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(controller.last_exit_code(), Some(0));
        // Disabled at start, re-enabled on exit
        assert_eq!(view.controls, vec![false, true]);
        assert!(view.log.iter().any(|line| line.contains("Connecting...")));
        assert!(view.progress.contains(&50));
        assert_eq!(view.progress.last(), Some(&100));
        assert!(view.errors.is_empty());
    }

    #[tokio::test]
    async fn failing_tool_still_returns_to_idle() {
        let dir = TempDir::new().unwrap();
        let tool = write_fake_tool(&dir, "echo 'A fatal error occurred' >&2\nexit 2");

        let mut controller = controller_with_tool(tool);
        controller.add_firmware("0x00", "/fw.bin").unwrap();

        controller.start_flashing(&options_for("/dev/ttyUSB0")).unwrap();
        controller.run_to_completion().await.unwrap();

        let view = controller.view();
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(controller.last_exit_code(), Some(2));
        assert_eq!(view.controls, vec![false, true]);
        // Exit code is not treated as an error by the session itself
        assert!(view.errors.is_empty());
        assert!(view.log.iter().any(|line| line.contains("A fatal error occurred")));
    }

    #[tokio::test]
    async fn manifest_is_locked_while_flashing() {
        let dir = TempDir::new().unwrap();
        let tool = write_fake_tool(&dir, "sleep 0.5\nexit 0");

        let mut controller = controller_with_tool(tool);
        controller.add_firmware("0x00", "/fw.bin").unwrap();
        controller.start_flashing(&options_for("/dev/ttyUSB0")).unwrap();

        assert!(controller.add_firmware("0x8000", "/late.bin").is_err());
        assert!(controller.remove_firmware(&[0]).is_err());
        assert!(controller.start_flashing(&options_for("/dev/ttyUSB0")).is_err());
        assert_eq!(controller.manifest().count(), 1);

        controller.run_to_completion().await.unwrap();
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn query_info_is_rejected_while_flashing() {
        let dir = TempDir::new().unwrap();
        let tool = write_fake_tool(&dir, "sleep 0.5\nexit 0");

        let mut controller = controller_with_tool(tool);
        controller.add_firmware("0x00", "/fw.bin").unwrap();
        controller.start_flashing(&options_for("/dev/ttyUSB0")).unwrap();

        assert!(controller.query_info("/fw.bin").await.is_err());

        controller.run_to_completion().await.unwrap();
    }
}
