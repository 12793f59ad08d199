//! Launching esptool and assembling its command line
//!
//! The argument grammar built here is a fixed contract with esptool:
//! `--port PORT write_flash --flash_mode MODE --flash_size SIZE
//! --flash_freq FREQ [--no-compress] ADDR1 PATH1 [ADDR2 PATH2 ...]`
//! plus the separate one-shot `image_info PATH` query.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::errors::{ESPFrontError, Result};
use crate::models::{AppEvent, FirmwareManifest, FlashOptions};

/// Name of the external flashing executable
pub const TOOL_NAME: &str = "esptool.py";

/// Output is drained in chunks of up to this many bytes, at whatever byte
/// boundaries the pipe delivers
const OUTPUT_CHUNK_SIZE: usize = 1024;

/// Handle for one launched flashing session.
///
/// The session controller owns at most one of these at a time and replaces
/// it per session. Exit is reported through the event channel; awaiting
/// `released` just waits for the drain tasks to wind down.
pub struct SessionHandle {
    waiter: JoinHandle<()>,
}

impl SessionHandle {
    pub async fn released(self) {
        let _ = self.waiter.await;
    }
}

/// Build the esptool `write_flash` argument list.
///
/// Pure and deterministic: base flags first, `--no-compress` when
/// compression is off, then every manifest entry in insertion order as an
/// address/path pair. The ordering must not be altered.
pub fn build_arguments(manifest: &FirmwareManifest, options: &FlashOptions) -> Vec<String> {
    let mut arguments = vec![
        "--port".to_string(),
        options.serial_port.clone(),
        "write_flash".to_string(),
        "--flash_mode".to_string(),
        options.flash_mode.as_arg().to_string(),
        "--flash_size".to_string(),
        options.flash_size.clone(),
        "--flash_freq".to_string(),
        options.flash_freq.clone(),
    ];

    if !options.compression {
        arguments.push("--no-compress".to_string());
    }

    for entry in manifest.iter() {
        arguments.push(entry.address.clone());
        arguments.push(entry.path.clone());
    }

    arguments
}

/// Find the esptool executable.
///
/// An explicit override (CLI flag or config file) wins, then a copy sitting
/// next to the espfront binary, then a PATH lookup.
pub fn locate_tool(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(TOOL_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    which::which(TOOL_NAME).map_err(|_| {
        ESPFrontError::Tool(format!(
            "{} not found next to the espfront binary or on PATH",
            TOOL_NAME
        ))
    })
}

/// Launch the flashing tool and stream its output into `tx`.
///
/// stdout and stderr are both piped and drained concurrently into the same
/// channel as `ToolOutput` chunks, so all output arrives through a single
/// stream, ordered per pipe. After the process exits and both drains finish, a
/// single `ToolExited` event is sent. A spawn failure (tool missing or not
/// executable) is returned as an error and no events are sent.
pub fn start(
    program: &Path,
    arguments: &[String],
    tx: mpsc::UnboundedSender<AppEvent>,
) -> Result<SessionHandle> {
    log::debug!("Launching {} {}", program.display(), arguments.join(" "));

    let mut child = Command::new(program)
        .args(arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ESPFrontError::Tool(format!("failed to launch {}: {}", program.display(), e))
        })?;

    let stdout_task = child
        .stdout
        .take()
        .map(|stream| tokio::spawn(pump_chunks(stream, tx.clone())));
    let stderr_task = child
        .stderr
        .take()
        .map(|stream| tokio::spawn(pump_chunks(stream, tx.clone())));

    let waiter = tokio::spawn(async move {
        let status = child.wait().await;

        // Let both drains deliver any tail output before signaling exit
        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        let code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                log::warn!("Failed to collect tool exit status: {}", e);
                None
            }
        };
        let _ = tx.send(AppEvent::ToolExited(code));
    });

    Ok(SessionHandle { waiter })
}

/// One-shot `image_info` query.
///
/// Blocks until the tool terminates and returns its combined stdout and
/// stderr with newlines normalized for display. Deliberately independent of
/// the session state machine.
pub async fn query_info(program: &Path, firmware_path: &str) -> Result<String> {
    let output = Command::new(program)
        .arg("image_info")
        .arg(firmware_path)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            ESPFrontError::Tool(format!("failed to run {}: {}", program.display(), e))
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text.replace("\r\n", "\n").trim_end().to_string())
}

async fn pump_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<AppEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut buffer = [0u8; OUTPUT_CHUNK_SIZE];
    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buffer[..n]).into_owned();
                if tx.send(AppEvent::ToolOutput(chunk)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::debug!("Tool output stream closed: {}", e);
                break;
            }
        }
    }
}
