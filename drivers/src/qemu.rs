//! QEMU `isa-debug-exit` device, used by the test harness to report a
//! pass/fail code to the host.

use x86_64::instructions::port::Port;

use vesper_lib::cpu;
use vesper_lib::ports::QEMU_DEBUG_EXIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QemuExitCode {
    Success = 0x10,
    Failed = 0x11,
}

/// Exit the emulator with the given code. On real hardware the write is
/// ignored and this halts forever.
pub fn exit_qemu(code: QemuExitCode) -> ! {
    // SAFETY: port 0xF4 is the isa-debug-exit device; writing any value is
    // side-effect free outside QEMU.
    unsafe {
        Port::<u32>::new(QEMU_DEBUG_EXIT).write(code as u32);
    }
    cpu::halt_loop()
}
