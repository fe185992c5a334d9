// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Server manager task engine

mod driver;
mod error;
pub mod report;
mod runner;

pub use driver::{ConsoleDriver, RawOutput, PROMPT_ECHO};
pub use error::RunError;
pub use report::{status_line, RecordingReporter, Reporter, TracingReporter};
pub use runner::{Runner, RunnerDeps, TaskOutcome, QUIT_COMMAND};
