//! COM1 serial driver and klog backend.

use core::fmt::{self, Write};

use spin::Mutex;
use uart_16550::SerialPort;
use vesper_lib::klog::klog_register_backend;
use vesper_lib::ports::COM1;

static SERIAL: Mutex<Option<SerialPort>> = Mutex::new(None);

/// Initialise COM1 and take over kernel log output from the early-boot
/// fallback.
pub fn init() {
    {
        let mut guard = SERIAL.lock();
        if guard.is_none() {
            // SAFETY: COM1 is the standard primary UART at 0x3F8 and is not
            // driven by any other code once this backend is registered.
            let mut port = unsafe { SerialPort::new(COM1) };
            port.init();
            *guard = Some(port);
        }
    }
    klog_register_backend(serial_klog_backend);
}

fn serial_klog_backend(args: fmt::Arguments<'_>) {
    let mut guard = SERIAL.lock();
    if let Some(port) = guard.as_mut() {
        let _ = port.write_fmt(args);
        let _ = port.write_str("\n");
    }
}

/// Write raw bytes to COM1, bypassing klog. Used by diagnostics.
pub fn write_bytes(bytes: &[u8]) {
    let mut guard = SERIAL.lock();
    if let Some(port) = guard.as_mut() {
        for &b in bytes {
            port.send(b);
        }
    }
}
