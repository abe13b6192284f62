//! Drawing algorithms over any [`vesper_abi::Canvas`].
//!
//! Pure pixel math, no hardware access: both the framebuffer context and
//! window content buffers are drawn through these routines.

#![no_std]
#![forbid(unsafe_code)]

pub mod canvas_ops;
pub mod font_render;
