//! Display geometry shared between the boot path and the video stack.

use crate::pixel::PixelFormat;

/// Geometry and layout of a linear framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes.
    pub pitch: u32,
    pub format: PixelFormat,
}

impl DisplayInfo {
    /// Upper bound on either dimension; larger values are treated as a
    /// corrupt bootloader response.
    pub const MAX_DIMENSION: u32 = 16_384;

    #[inline]
    pub const fn new(width: u32, height: u32, pitch: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pitch,
            format,
        }
    }

    #[inline]
    pub const fn bytes_per_pixel(&self) -> u8 {
        self.format.bytes_per_pixel()
    }

    /// Total byte size of the framebuffer (`pitch * height`).
    #[inline]
    pub const fn buffer_size(&self) -> u64 {
        self.pitch as u64 * self.height as u64
    }
}

/// A framebuffer handed to the kernel once at boot: a virtual base address
/// plus its geometry.
#[derive(Debug, Clone, Copy)]
pub struct FramebufferData {
    pub address: u64,
    pub info: DisplayInfo,
}
