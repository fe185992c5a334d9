// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the console process and script staging

pub mod console;
pub mod profile;
pub mod stage;
pub mod traced;

pub use console::{
    Console, ConsoleError, ConsoleLauncher, ConsoleSpec, ExitReport, SrvrmgrConsole,
    SrvrmgrLauncher, Stream,
};
pub use stage::{DirStager, InPlaceStager, StageError, Stager};
pub use traced::{TracedConsole, TracedConsoleLauncher, TracedStager};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use console::{ConsoleCall, FakeConsole, FakeConsoleLauncher, FakeReply};
#[cfg(any(test, feature = "test-support"))]
pub use stage::{FakeStager, StageCall};
