//! I/O port numbers and the low-level serial primitives used before the
//! serial driver is up.

use x86_64::instructions::port::Port;

pub const COM1: u16 = 0x3F8;

pub const PS2_DATA: u16 = 0x60;
pub const PS2_STATUS: u16 = 0x64;
pub const PS2_COMMAND: u16 = 0x64;

pub const QEMU_DEBUG_EXIT: u16 = 0xF4;

pub const UART_REG_THR: u16 = 0;
pub const UART_REG_LSR: u16 = 5;
pub const UART_LSR_TX_EMPTY: u8 = 0x20;

// ---------------------------------------------------------------------------
// Early serial output
// ---------------------------------------------------------------------------
//
// The klog fallback path writes through these before the UART driver has
// registered itself as the log backend. They are intentionally lock-free:
// callers are responsible for serialisation.

/// Write one byte to a UART, polling the Line Status Register until the
/// transmit holding register is empty.
///
/// # Safety
///
/// Port I/O. Caller must ensure `base` refers to an 8250/16550-compatible
/// UART and that concurrent access is serialised.
#[inline(always)]
pub unsafe fn serial_putc(base: u16, byte: u8) {
    let mut lsr = Port::<u8>::new(base + UART_REG_LSR);
    let mut thr = Port::<u8>::new(base + UART_REG_THR);
    unsafe {
        while lsr.read() & UART_LSR_TX_EMPTY == 0 {
            core::hint::spin_loop();
        }
        thr.write(byte);
    }
}

/// Write a byte slice to a UART, converting lone `\n` into `\r\n`.
///
/// # Safety
///
/// Same requirements as [`serial_putc`].
#[inline]
pub unsafe fn serial_write_bytes(base: u16, bytes: &[u8]) {
    for &b in bytes {
        if b == b'\n' {
            unsafe { serial_putc(base, b'\r') };
        }
        unsafe { serial_putc(base, b) };
    }
}
