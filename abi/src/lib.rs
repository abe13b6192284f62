//! VesperOS shared leaf types.
//!
//! This crate is the single source of truth for the types every layer of the
//! display stack agrees on: pixel formats and colors, the `Canvas` drawing
//! trait, the bitmap font, window flags/geometry/theme constants, and the
//! pointer-input types. It has no dependencies on the rest of the kernel and
//! contains no unsafe code, so drivers, the compositor, and tests can all
//! share it freely.

#![no_std]
#![forbid(unsafe_code)]

pub mod display;
pub mod draw;
pub mod font;
pub mod input;
pub mod pixel;
pub mod window;

pub use display::{DisplayInfo, FramebufferData};
pub use draw::{Canvas, Color32, EncodedPixel};
pub use input::{MousePacket, PointerButtons};
pub use pixel::PixelFormat;
pub use window::{WindowFlags, WindowId};
