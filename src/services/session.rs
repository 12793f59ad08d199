//! Flashing session orchestration
//!
//! The session controller owns the manifest, the single active tool handle,
//! and the event channel, and drives a `FrontendView` in response to what
//! the tool prints. It is generic over the view so tests can inject a
//! recording implementation and feed it fake events.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::errors::{ESPFrontError, Result};
use crate::models::{
    AppEvent, FirmwareManifest, FlashOptions, ManifestChange, SessionState, SubprocessEvent,
};
use crate::services::invoker::SessionHandle;
use crate::services::{classifier, invoker};
use crate::ui::FrontendView;

pub struct SessionController<V: FrontendView> {
    state: SessionState,
    manifest: FirmwareManifest,
    manifest_rx: mpsc::UnboundedReceiver<ManifestChange>,
    tool_path: PathBuf,
    // At most one active subprocess handle, replaced per session
    session: Option<SessionHandle>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    last_exit_code: Option<i32>,
    view: V,
}

impl<V: FrontendView> SessionController<V> {
    pub fn new(view: V, tool_path: PathBuf) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (manifest_tx, manifest_rx) = mpsc::unbounded_channel();

        let mut manifest = FirmwareManifest::new();
        manifest.subscribe(manifest_tx);

        Self {
            state: SessionState::Idle,
            manifest,
            manifest_rx,
            tool_path,
            session: None,
            events_tx,
            events_rx,
            last_exit_code: None,
            view,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn manifest(&self) -> &FirmwareManifest {
        &self.manifest
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Exit code of the most recently finished session, when the OS
    /// reported one. The session outcome does not depend on it; it is
    /// only exposed so the CLI can mirror the tool's exit status.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code
    }

    /// Append a firmware entry. Rejected while a flash is running; the UI
    /// disables the control as well, this guard is the backstop.
    pub fn add_firmware(&mut self, address: &str, path: &str) -> Result<()> {
        self.ensure_idle("cannot modify the manifest while flashing")?;
        self.manifest.add(address, path);
        self.apply_manifest_changes();
        Ok(())
    }

    /// Remove manifest entries by row index (multi-selection removal).
    pub fn remove_firmware(&mut self, indices: &[usize]) -> Result<()> {
        self.ensure_idle("cannot modify the manifest while flashing")?;
        self.manifest.remove_at(indices);
        self.apply_manifest_changes();
        Ok(())
    }

    /// Start a flashing session from the current manifest and the given
    /// options.
    ///
    /// On a successful launch the state moves to `Flashing` and mutating
    /// controls are disabled until the tool exits. On a start failure the
    /// state stays `Idle`, the error is surfaced on the view, and the error
    /// is also returned so callers can abort.
    pub fn start_flashing(&mut self, options: &FlashOptions) -> Result<()> {
        self.ensure_idle("a flashing session is already running")?;
        if self.manifest.is_empty() {
            return Err(ESPFrontError::Session(
                "no firmware files to flash".to_string(),
            ));
        }

        let arguments = invoker::build_arguments(&self.manifest, options);
        match invoker::start(&self.tool_path, &arguments, self.events_tx.clone()) {
            Ok(handle) => {
                self.session = Some(handle);
                self.state = SessionState::Flashing;
                self.view.set_controls_enabled(false);
                log::info!(
                    "Flashing {} image(s) to {}",
                    self.manifest.count(),
                    options.serial_port
                );
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                log::error!("{}", message);
                self.view.show_error(&message);
                Err(e)
            }
        }
    }

    /// Dispatch one raw subprocess event.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ToolOutput(chunk) => match classifier::classify(&chunk) {
                Some(SubprocessEvent::Progress(percent)) => {
                    self.view.set_progress(percent.min(100) as u8);
                }
                Some(SubprocessEvent::Log(line)) => {
                    self.view.append_log(&line);
                }
                None => {}
            },
            AppEvent::ToolExited(code) => {
                // Exit code is logged but not inspected: any termination
                // returns the UI to its idle state
                log::info!("Flashing tool exited with code {:?}", code);
                self.last_exit_code = code;
                self.finish_session();
            }
        }
    }

    /// Drain subprocess events until the session returns to idle.
    pub async fn run_to_completion(&mut self) -> Result<()> {
        while self.state == SessionState::Flashing {
            match self.events_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => {
                    self.finish_session();
                    break;
                }
            }
        }
        if let Some(handle) = self.session.take() {
            handle.released().await;
        }
        Ok(())
    }

    /// One-shot `image_info` query for a single firmware file.
    ///
    /// Guarded no-op errors instead of faults: an empty path (nothing
    /// selected) and an active flash are both rejected.
    pub async fn query_info(&mut self, firmware_path: &str) -> Result<String> {
        if firmware_path.is_empty() {
            return Err(ESPFrontError::Session(
                "no firmware file selected".to_string(),
            ));
        }
        self.ensure_idle("firmware info is not available while flashing")?;
        invoker::query_info(&self.tool_path, firmware_path).await
    }

    fn ensure_idle(&self, message: &str) -> Result<()> {
        if self.state == SessionState::Flashing {
            return Err(ESPFrontError::Session(message.to_string()));
        }
        Ok(())
    }

    fn apply_manifest_changes(&mut self) {
        while let Ok(change) = self.manifest_rx.try_recv() {
            log::debug!("Manifest changed: {:?}", change);
        }
        // Flashing only makes sense with at least one entry
        self.view.set_flash_enabled(!self.manifest.is_empty());
    }

    fn finish_session(&mut self) {
        self.state = SessionState::Idle;
        self.session = None;
        self.view.set_controls_enabled(true);
    }
}
