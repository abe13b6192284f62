//! VesperOS kernel utility layer.
//!
//! Small, dependency-light building blocks shared by every driver and
//! subsystem: logging, port constants and early serial output, CPU
//! intrinsics, a fixed-capacity ring buffer, string/number formatting
//! helpers, and the in-kernel test harness.

#![no_std]

pub mod cpu;
pub mod klog;
pub mod numfmt;
pub mod ports;
pub mod ring_buffer;
pub mod string;
pub mod testing;
pub mod tsc;

#[doc(hidden)]
pub use paste;

pub use klog::{KlogLevel, klog_get_level, klog_init, klog_register_backend, klog_set_level};
pub use ring_buffer::RingBuffer;
