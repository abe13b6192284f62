//! VesperOS hardware drivers.
//!
//! Everything here is polled; no interrupt handlers are installed. The PS/2
//! stack reads the controller's status register and consumes at most one
//! byte per call, so callers can interleave input polling with rendering.

#![no_std]

pub mod ps2;
pub mod qemu;
pub mod serial;
