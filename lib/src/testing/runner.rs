use crate::klog_info;
use crate::testing::TestResult;

/// Execute one test function, logging its outcome.
pub fn run_single_test(name: &str, test: impl FnOnce() -> TestResult) -> TestResult {
    let result = test();
    match result {
        TestResult::Pass => klog_info!("TEST {} ... ok", name),
        TestResult::Skipped => klog_info!("TEST {} ... skipped", name),
        TestResult::Fail => klog_info!("TEST {} ... FAILED", name),
    }
    result
}
