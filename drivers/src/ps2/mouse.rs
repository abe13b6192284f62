//! PS/2 mouse driver (polled).
//!
//! Bytes are pulled off the controller one at a time by [`poll`] and
//! accumulated into 3-byte packets. Byte 0 is validated against the
//! protocol's sync bit; a byte that cannot start a packet is discarded,
//! which resynchronises the stream after a dropped byte.

use spin::Mutex;

use vesper_abi::input::{MousePacket, PACKET_SYNC, PointerButtons};
use vesper_lib::{klog_info, klog_warn};

use crate::ps2;

/// Cursor position and button state as seen by the rest of the kernel.
///
/// Only this driver writes it; everyone else reads copies via [`state`].
#[derive(Clone, Copy, Debug)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: PointerButtons,
}

pub(crate) struct MouseDriver {
    pub(crate) state: MouseState,
    packet: [u8; 3],
    pub(crate) packet_byte: usize,
    max_x: i32,
    max_y: i32,
    pub(crate) present: bool,
}

impl MouseDriver {
    pub(crate) const fn new() -> Self {
        Self {
            state: MouseState {
                x: 0,
                y: 0,
                buttons: PointerButtons::empty(),
            },
            packet: [0; 3],
            packet_byte: 0,
            max_x: 1,
            max_y: 1,
            present: false,
        }
    }

    /// Accumulate one raw byte. Returns the completed packet on every third
    /// accepted byte, after applying it to the cursor state.
    pub(crate) fn feed_byte(&mut self, byte: u8) -> Option<MousePacket> {
        // A packet can only start on a byte with the sync bit set; anything
        // else is a stream glitch and is dropped.
        if self.packet_byte == 0 && byte & PACKET_SYNC == 0 {
            return None;
        }

        self.packet[self.packet_byte] = byte;
        self.packet_byte = (self.packet_byte + 1) % 3;
        if self.packet_byte != 0 {
            return None;
        }

        let packet = MousePacket::new(self.packet[0], self.packet[1], self.packet[2]);
        self.apply_packet(packet);
        Some(packet)
    }

    /// Apply a decoded packet: buttons always, movement only when neither
    /// overflow flag is set.
    pub(crate) fn apply_packet(&mut self, packet: MousePacket) {
        self.state.buttons = packet.buttons();
        if let Some((dx, dy)) = packet.delta() {
            self.state.x += dx;
            // Device Y grows upward, screen Y grows downward.
            self.state.y -= dy;
            self.clamp();
        }
    }

    fn clamp(&mut self) {
        self.state.x = self.state.x.clamp(0, self.max_x - 1);
        self.state.y = self.state.y.clamp(0, self.max_y - 1);
    }

    pub(crate) fn set_bounds(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.max_x = width;
        self.max_y = height;
        self.clamp();
    }
}

static DRIVER: Mutex<MouseDriver> = Mutex::new(MouseDriver::new());

/// Initialise the PS/2 mouse device.
///
/// Expects that [`ps2::init_controller`] has already run (ports enabled,
/// clean config written with IRQs off). Sends set-defaults and
/// enable-reporting via the AUX-aware ACK path so a keyboard byte is never
/// consumed as a mouse ACK.
///
/// Returns `false` when the device never acknowledges; the pointer is then
/// inert but boot continues.
pub fn init() -> bool {
    klog_info!("PS/2 mouse: initialising device");

    if !ps2::write_aux_acked(ps2::DEV_CMD_DEFAULTS) || !ps2::write_aux_acked(ps2::DEV_CMD_ENABLE) {
        klog_warn!("PS/2 mouse: no response, pointer disabled");
        DRIVER.lock().present = false;
        return false;
    }

    // Flush any trailing bytes the mouse may have sent during init.
    ps2::flush();

    let mut drv = DRIVER.lock();
    drv.present = true;
    drv.packet_byte = 0;
    drv.state.x = drv.max_x / 2;
    drv.state.y = drv.max_y / 2;
    klog_info!("PS/2 mouse: initialised at ({}, {})", drv.state.x, drv.state.y);
    true
}

/// Clamp cursor movement to `[0, width) x [0, height)`.
pub fn set_bounds(width: i32, height: i32) {
    DRIVER.lock().set_bounds(width, height);
}

pub fn is_present() -> bool {
    DRIVER.lock().present
}

/// Consume at most one pending mouse byte.
///
/// Returns immediately with `None` when the controller has no mouse byte
/// for us; returns the decoded packet when the consumed byte completed one.
pub fn poll() -> Option<MousePacket> {
    let status = ps2::read_status();
    if status & ps2::STATUS_OUTPUT_FULL == 0 || status & ps2::STATUS_MOUSE_DATA == 0 {
        return None;
    }
    let byte = ps2::read_data_nowait();
    DRIVER.lock().feed_byte(byte)
}

/// Snapshot of the current cursor state.
pub fn state() -> MouseState {
    DRIVER.lock().state
}
