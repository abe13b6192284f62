//! Pointer input types: PS/2 mouse packets and button state.

use bitflags::bitflags;

bitflags! {
    /// Mouse button state, one bit per button.
    ///
    /// The bit layout matches byte 0 of a PS/2 mouse report, so the driver
    /// can mask the flags byte directly.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerButtons: u8 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const MIDDLE = 0x04;
    }
}

/// Byte 0 of every PS/2 mouse report has this bit set; a byte without it
/// cannot start a packet.
pub const PACKET_SYNC: u8 = 0x08;
/// X delta is negative (9-bit two's complement).
pub const PACKET_X_SIGN: u8 = 0x10;
/// Y delta is negative (9-bit two's complement).
pub const PACKET_Y_SIGN: u8 = 0x20;
/// X delta overflowed the 9-bit range.
pub const PACKET_X_OVERFLOW: u8 = 0x40;
/// Y delta overflowed the 9-bit range.
pub const PACKET_Y_OVERFLOW: u8 = 0x80;

/// A raw 3-byte PS/2 mouse report.
///
/// `dx`/`dy` are the raw unsigned magnitude bytes; the sign and overflow
/// bits live in `flags`. Decode with [`MousePacket::delta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MousePacket {
    pub flags: u8,
    pub dx: u8,
    pub dy: u8,
}

impl MousePacket {
    #[inline]
    pub const fn new(flags: u8, dx: u8, dy: u8) -> Self {
        Self { flags, dx, dy }
    }

    /// Button state carried by this packet. Valid even when the movement
    /// overflowed.
    #[inline]
    pub fn buttons(&self) -> PointerButtons {
        PointerButtons::from_bits_truncate(self.flags & 0x07)
    }

    /// Decode the movement deltas in device coordinates (positive Y is up).
    ///
    /// Returns `None` when either overflow flag is set; the deltas are
    /// garbage in that case and applying them would teleport the cursor.
    #[inline]
    pub fn delta(&self) -> Option<(i32, i32)> {
        if self.flags & (PACKET_X_OVERFLOW | PACKET_Y_OVERFLOW) != 0 {
            return None;
        }
        let mut dx = self.dx as i32;
        if self.flags & PACKET_X_SIGN != 0 {
            dx -= 256;
        }
        let mut dy = self.dy as i32;
        if self.flags & PACKET_Y_SIGN != 0 {
            dy -= 256;
        }
        Some((dx, dy))
    }
}
