//! Primitive CPU instruction wrappers.

/// Execute the HLT instruction, halting the CPU until the next interrupt.
#[inline(always)]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Spin-loop hint (PAUSE on x86_64).
#[inline(always)]
pub fn pause() {
    core::hint::spin_loop();
}

/// Halt forever in a loop. Does not return.
#[inline(always)]
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}
