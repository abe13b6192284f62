#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Harness configuration.
///
/// The kernel decides at boot whether the harness runs; there is no runtime
/// configuration store, so this is a plain value passed into
/// `tests_run_all`.
#[derive(Clone, Copy, Debug)]
pub struct TestConfig {
    pub enabled: bool,
    /// Exit the emulator with a pass/fail code once the run completes.
    pub shutdown: bool,
    pub verbosity: Verbosity,
}

impl TestConfig {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            shutdown: false,
            verbosity: Verbosity::Normal,
        }
    }

    pub const fn run_and_shutdown() -> Self {
        Self {
            enabled: true,
            shutdown: true,
            verbosity: Verbosity::Normal,
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::disabled()
    }
}
