//! Serial port enumeration
//!
//! Thin wrapper over the OS port list; espfront only consumes the names to
//! populate a selection control.

use crate::errors::Result;

/// All serial ports the OS reports, sorted by name.
pub fn list_serial_ports() -> Result<Vec<String>> {
    let mut ports: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|port| port.port_name)
        .collect();
    ports.sort();
    Ok(ports)
}

/// Whether a port name looks like the USB serial adapters ESP boards
/// enumerate as on macOS and Linux.
pub fn is_usb_serial(port_name: &str) -> bool {
    port_name.contains("/dev/cu.usbmodem")
        || port_name.contains("/dev/cu.usbserial")
        || port_name.contains("/dev/tty.usbmodem")
        || port_name.contains("/dev/tty.usbserial")
        || port_name.contains("/dev/ttyUSB")
        || port_name.contains("/dev/ttyACM")
}

/// Order port names with USB serial devices ahead of the rest, preserving
/// name order within each group.
pub fn usb_first(ports: Vec<String>) -> Vec<String> {
    let (usb, other): (Vec<String>, Vec<String>) =
        ports.into_iter().partition(|name| is_usb_serial(name));
    usb.into_iter().chain(other).collect()
}

/// All serial ports the OS reports, likely ESP USB adapters first.
pub fn list_serial_ports_usb_first() -> Result<Vec<String>> {
    Ok(usb_first(list_serial_ports()?))
}
