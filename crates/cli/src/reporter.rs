// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress lines on stderr

use smr_core::{CommandResult, ScriptSkip};
use smr_engine::{status_line, Reporter};

/// Writes one status line per command to stderr, keeping stdout for results
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn plan_ready(&self, commands: usize) {
        eprintln!("Execute tasks [{}]...", commands);
    }

    fn script_skipped(&self, skip: &ScriptSkip) {
        eprintln!(
            "Fail on checking script by filter: {}: {}",
            skip.path.display(),
            skip.reason
        );
    }

    fn command_finished(&self, result: &CommandResult) {
        eprintln!("{}", status_line(result));
    }
}
