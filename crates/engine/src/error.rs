// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the task runner

use smr_adapters::{ConsoleError, StageError};
use smr_core::{ParamsError, StackError};
use thiserror::Error;

/// Errors that abort a run before or around command execution
///
/// A command that fails on the console is not one of these; it ends the
/// run with a failed [`crate::TaskOutcome`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("command stack error: {0}")]
    Stack(#[from] StackError),
    #[error("staging error: {0}")]
    Stage(#[from] StageError),
    #[error("console error: {0}")]
    Console(#[from] ConsoleError),
}
