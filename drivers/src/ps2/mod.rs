//! PS/2 Controller Driver
//!
//! Shared low-level access to the PS/2 controller (historically the 8042)
//! for the keyboard and mouse drivers, through ports 0x60 (data) and 0x64
//! (status/command). The controller multiplexes both devices onto the one
//! data port; status bit 5 tells them apart.
//!
//! The kernel runs fully polled: IRQ generation is switched off in the
//! controller configuration byte and drivers sample the status register
//! from the tick loop instead.
//!
//! # Status Register (Port 0x64 read)
//!
//! | Bit | Name | Description |
//! |-----|------|-------------|
//! | 0   | OBF  | Output buffer full (data available to read) |
//! | 1   | IBF  | Input buffer full (controller busy) |
//! | 5   | MOBF | Mouse output buffer full |
//! | 6   | TMOE | Timeout error |
//! | 7   | PARE | Parity error |

pub mod keyboard;
pub mod mouse;

pub mod keyboard_tests;
pub mod mouse_tests;

use x86_64::instructions::port::Port;

use vesper_lib::cpu;
use vesper_lib::klog_info;
use vesper_lib::ports::{PS2_COMMAND, PS2_DATA, PS2_STATUS};

// =============================================================================
// Status Register Bits
// =============================================================================

/// Output buffer full - data available to read from port 0x60
pub const STATUS_OUTPUT_FULL: u8 = 0x01;

/// Input buffer full - controller is processing, wait before writing
pub const STATUS_INPUT_FULL: u8 = 0x02;

/// Mouse data available (auxiliary output buffer full)
pub const STATUS_MOUSE_DATA: u8 = 0x20;

// =============================================================================
// Controller Commands (written to port 0x64)
// =============================================================================

/// Read controller configuration byte
pub const CMD_READ_CONFIG: u8 = 0x20;

/// Write controller configuration byte
pub const CMD_WRITE_CONFIG: u8 = 0x60;

/// Disable auxiliary (mouse) interface
pub const CMD_DISABLE_AUX: u8 = 0xA7;

/// Enable auxiliary (mouse) interface
pub const CMD_ENABLE_AUX: u8 = 0xA8;

/// Disable first PS/2 port (keyboard)
pub const CMD_DISABLE_FIRST: u8 = 0xAD;

/// Enable first PS/2 port (keyboard)
pub const CMD_ENABLE_FIRST: u8 = 0xAE;

/// Write next byte to auxiliary (mouse) device
pub const CMD_WRITE_AUX: u8 = 0xD4;

// =============================================================================
// Configuration Byte Bits
// =============================================================================

/// Enable first port (keyboard) interrupt (IRQ1)
pub const CONFIG_FIRST_IRQ: u8 = 0x01;

/// Enable auxiliary (mouse) interrupt (IRQ12)
pub const CONFIG_AUX_IRQ: u8 = 0x02;

/// Disable first port clock
pub const CONFIG_FIRST_CLOCK_DISABLE: u8 = 0x10;

/// Disable auxiliary port clock
pub const CONFIG_AUX_CLOCK_DISABLE: u8 = 0x20;

/// Enable first port translation (scancode set 1)
pub const CONFIG_TRANSLATION: u8 = 0x40;

// =============================================================================
// Device Commands (written to port 0x60)
// =============================================================================

/// Reset device
pub const DEV_CMD_RESET: u8 = 0xFF;

/// Set device defaults
pub const DEV_CMD_DEFAULTS: u8 = 0xF6;

/// Enable data reporting (mouse)
pub const DEV_CMD_ENABLE: u8 = 0xF4;

/// Device acknowledge response
pub const DEV_ACK: u8 = 0xFA;

/// Device resend request
pub const DEV_RESEND: u8 = 0xFE;

/// Device self-test passed response
pub const DEV_SELF_TEST_PASS: u8 = 0xAA;

// =============================================================================
// Timing Constants
// =============================================================================

/// Maximum iterations to wait for controller ready (roughly 100ms at
/// typical bus speeds). Every wait in this module is bounded by this so a
/// dead or absent device can never hang the kernel.
const WAIT_ITERATIONS: u32 = 100_000;

/// Retries for a device command that answers with RESEND.
const ACK_RETRIES: u32 = 3;

// =============================================================================
// Low-Level Controller Access
// =============================================================================

/// Read the PS/2 controller status register.
#[inline(always)]
pub fn read_status() -> u8 {
    // SAFETY: reading the 8042 status register has no side effects.
    unsafe { Port::<u8>::new(PS2_STATUS).read() }
}

/// Check if data is available to read from the controller.
#[inline(always)]
pub fn has_data() -> bool {
    read_status() & STATUS_OUTPUT_FULL != 0
}

/// Check if the pending data byte is from the mouse (auxiliary device).
#[inline(always)]
pub fn is_mouse_data() -> bool {
    read_status() & STATUS_MOUSE_DATA != 0
}

/// Check if the controller input buffer is full (busy).
#[inline(always)]
pub fn is_busy() -> bool {
    read_status() & STATUS_INPUT_FULL != 0
}

/// Poll the status register until `condition` returns `true`, or timeout.
#[inline(always)]
fn wait_for_status(condition: fn() -> bool) -> bool {
    for _ in 0..WAIT_ITERATIONS {
        if condition() {
            return true;
        }
        cpu::pause();
    }
    false
}

#[inline(always)]
fn is_ready() -> bool {
    !is_busy()
}

/// Wait (bounded) until the controller accepts input. `false` on timeout.
#[inline(always)]
pub fn wait_ready() -> bool {
    wait_for_status(is_ready)
}

/// Wait (bounded) until data is available to read. `false` on timeout.
#[inline(always)]
pub fn wait_data() -> bool {
    wait_for_status(has_data)
}

/// Write a command to the PS/2 controller (port 0x64).
///
/// Returns `false` if the controller never became ready.
#[inline(always)]
pub fn write_command(cmd: u8) -> bool {
    if !wait_ready() {
        return false;
    }
    // SAFETY: 8042 command port write, gated on the input buffer being empty.
    unsafe { Port::<u8>::new(PS2_COMMAND).write(cmd) };
    true
}

/// Write data to the PS/2 data port (port 0x60).
#[inline(always)]
pub fn write_data(data: u8) -> bool {
    if !wait_ready() {
        return false;
    }
    // SAFETY: 8042 data port write, gated on the input buffer being empty.
    unsafe { Port::<u8>::new(PS2_DATA).write(data) };
    true
}

/// Wait (bounded) for a byte and read it. `None` on timeout.
#[inline(always)]
pub fn read_data() -> Option<u8> {
    if !wait_data() {
        return None;
    }
    Some(read_data_nowait())
}

/// Read the data port immediately without waiting.
///
/// Caller must have checked the status register first.
#[inline(always)]
pub fn read_data_nowait() -> u8 {
    // SAFETY: reading the 8042 data port; the caller has established that
    // a byte is pending (or is deliberately flushing).
    unsafe { Port::<u8>::new(PS2_DATA).read() }
}

/// Drain any bytes sitting in the controller's output buffer.
pub fn flush() {
    for _ in 0..WAIT_ITERATIONS {
        if !has_data() {
            break;
        }
        let _ = read_data_nowait();
    }
}

// =============================================================================
// Mouse (Auxiliary Device) Operations
// =============================================================================

/// Write a command byte to the mouse (auxiliary device).
#[inline(always)]
pub fn write_aux(cmd: u8) -> bool {
    write_command(CMD_WRITE_AUX) && write_data(cmd)
}

/// Send a device command to the mouse and wait for its ACK, honouring
/// RESEND requests. `false` when the device never acknowledges; callers
/// treat that as "no mouse present".
pub fn write_aux_acked(cmd: u8) -> bool {
    for _ in 0..ACK_RETRIES {
        if !write_aux(cmd) {
            return false;
        }
        match read_data() {
            Some(DEV_ACK) => return true,
            Some(DEV_RESEND) => continue,
            _ => return false,
        }
    }
    false
}

/// Read the controller configuration byte.
pub fn read_config() -> Option<u8> {
    if !write_command(CMD_READ_CONFIG) {
        return None;
    }
    read_data()
}

/// Write the controller configuration byte.
pub fn write_config(config: u8) -> bool {
    write_command(CMD_WRITE_CONFIG) && write_data(config)
}

// =============================================================================
// Controller Initialisation
// =============================================================================

/// Bring the controller into polled dual-port operation: both ports
/// enabled and clocked, scancode translation on, IRQ generation off.
///
/// Returns `false` when the controller never responded; the input stack is
/// inert in that case but boot continues.
pub fn init_controller() -> bool {
    write_command(CMD_DISABLE_FIRST);
    write_command(CMD_DISABLE_AUX);
    flush();

    let Some(config) = read_config() else {
        return false;
    };

    let config = (config | CONFIG_TRANSLATION)
        & !(CONFIG_FIRST_IRQ | CONFIG_AUX_IRQ | CONFIG_FIRST_CLOCK_DISABLE | CONFIG_AUX_CLOCK_DISABLE);
    if !write_config(config) {
        return false;
    }

    write_command(CMD_ENABLE_FIRST);
    write_command(CMD_ENABLE_AUX);
    flush();

    klog_info!("PS/2 controller: polled mode, config {:#04x}", config);
    true
}
