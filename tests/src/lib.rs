//! Test-suite aggregation.
//!
//! Each crate defines its suites next to the code under test with
//! `define_test_suite!`; this crate lists them all and provides the
//! run-everything entry point the kernel calls under the `builtin-tests`
//! feature.

#![no_std]

pub mod lib_tests;

use vesper_drivers::qemu::{QemuExitCode, exit_qemu};
use vesper_lib::testing::{TestConfig, TestRunSummary, TestSuiteDesc, TestSuiteResult};
use vesper_lib::{cpu, klog_info};

/// Every suite in the kernel, in run order. Pure-logic suites go first so
/// a broken framebuffer path cannot mask their results.
static SUITES: &[&TestSuiteDesc] = &[
    &lib_tests::CORE_PRIMITIVES_SUITE,
    &vesper_drivers::ps2::mouse_tests::PS2_MOUSE_SUITE,
    &vesper_drivers::ps2::keyboard_tests::PS2_KEYBOARD_SUITE,
    &vesper_wm::registry_tests::WM_REGISTRY_SUITE,
    &vesper_wm::interact_tests::WM_INTERACT_SUITE,
    &vesper_video::cursor_tests::VIDEO_CURSOR_SUITE,
    &vesper_wm::compositor_tests::WM_COMPOSITOR_SUITE,
];

/// Run every registered suite, logging per-suite lines and a final
/// summary.
pub fn tests_run_all(config: &TestConfig) -> TestRunSummary {
    let mut summary = TestRunSummary::default();
    if !config.enabled {
        klog_info!("TESTS: harness disabled");
        return summary;
    }

    klog_info!("TESTS: running {} suites", SUITES.len());
    for desc in SUITES {
        let mut result = TestSuiteResult::new(desc.name);
        let _ = (desc.run)(&mut result);
        klog_info!(
            "TESTS: suite {}: {}/{} passed ({} ms)",
            result.name,
            result.passed,
            result.total,
            result.elapsed_ms
        );
        summary.add_suite_result(&result);
    }

    if summary.all_passed() {
        klog_info!("TESTS: all {} tests passed", summary.total_tests);
    } else {
        klog_info!(
            "TESTS: {} of {} tests FAILED",
            summary.failed,
            summary.total_tests
        );
    }
    summary
}

/// Run everything, then report the verdict to the host (or halt when
/// shutdown is off).
pub fn run_and_exit(config: &TestConfig) -> ! {
    let summary = tests_run_all(config);
    if config.shutdown {
        let code = if summary.all_passed() {
            QemuExitCode::Success
        } else {
            QemuExitCode::Failed
        };
        exit_qemu(code)
    }
    cpu::halt_loop()
}
