//! Command handlers for the ESPFront CLI

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::AppConfig;
use crate::models::{FlashMode, FlashOptions};
use crate::services::invoker;
use crate::services::session::SessionController;
use crate::ui::ConsoleView;
use crate::utils::ports;

/// List the serial ports the OS reports, likely ESP USB adapters first and
/// marked with a plug.
pub fn run_ports() -> Result<()> {
    let port_names =
        ports::list_serial_ports_usb_first().context("Failed to enumerate serial ports")?;

    if port_names.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for name in &port_names {
        if ports::is_usb_serial(name) {
            println!("🔌 {}", name);
        } else {
            println!("   {}", name);
        }
    }
    Ok(())
}

/// Build a manifest from the ADDR/FILE pairs and run a full flashing session
/// to completion. The process exit status mirrors the tool's when available.
#[allow(clippy::too_many_arguments)]
pub async fn run_flash(
    tool_override: Option<&Path>,
    config: &AppConfig,
    port: String,
    mode: Option<FlashMode>,
    size: Option<String>,
    freq: Option<String>,
    no_compress: bool,
    images: Vec<String>,
) -> Result<()> {
    if images.len() % 2 != 0 {
        bail!("firmware images must be given as ADDRESS FILE pairs");
    }

    let tool = locate_tool(tool_override, config)?;
    let mut controller = SessionController::new(ConsoleView::new(), tool);

    for pair in images.chunks(2) {
        controller
            .add_firmware(&pair[0], &pair[1])
            .context("Failed to add firmware entry")?;
    }

    let options = FlashOptions {
        serial_port: port,
        flash_mode: mode.unwrap_or(config.flash.mode),
        flash_size: size.unwrap_or_else(|| config.flash.size.clone()),
        flash_freq: freq.unwrap_or_else(|| config.flash.freq.clone()),
        compression: !no_compress && config.flash.compression,
    };

    // Start failure is already surfaced on the view
    if controller.start_flashing(&options).is_err() {
        std::process::exit(1);
    }
    controller.run_to_completion().await?;

    if let Some(code) = controller.last_exit_code() {
        if code != 0 {
            std::process::exit(code);
        }
    }
    Ok(())
}

/// Run the one-shot `image_info` query and print the tool's output.
pub async fn run_info(
    tool_override: Option<&Path>,
    config: &AppConfig,
    firmware: String,
) -> Result<()> {
    let tool = locate_tool(tool_override, config)?;
    let mut controller = SessionController::new(ConsoleView::new(), tool);

    let info = controller
        .query_info(&firmware)
        .await
        .with_context(|| format!("Failed to query info for {}", firmware))?;

    println!("Info for {}:", firmware);
    println!();
    println!("{}", info);
    Ok(())
}

fn locate_tool(tool_override: Option<&Path>, config: &AppConfig) -> Result<std::path::PathBuf> {
    let override_path = tool_override.or(config.tool_path.as_deref());
    Ok(invoker::locate_tool(override_path)?)
}
