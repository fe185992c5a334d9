// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing progress reporting

use smr_core::{CommandResult, CommandStatus, ScriptSkip};
use std::sync::{Arc, Mutex};

/// Receives progress of a run; everything passed in is already redacted
pub trait Reporter: Send + Sync {
    /// The stack is resolved and staged
    fn plan_ready(&self, commands: usize) {
        let _ = commands;
    }

    /// A script was left out of the stack
    fn script_skipped(&self, skip: &ScriptSkip) {
        let _ = skip;
    }

    /// A command finished
    fn command_finished(&self, result: &CommandResult);
}

/// Status line for a finished command
pub fn status_line(result: &CommandResult) -> String {
    let prefix = format!("Srvrmgr task: \"{}\" ->", result.cmd);
    match result.status() {
        CommandStatus::Ok => format!("{} Ok", prefix),
        CommandStatus::Failed => format!("{} Fail", prefix),
        CommandStatus::Warned => format!(
            "{} Skipped with errors:\n - {}",
            prefix,
            result.warning_lines().join("\n - ")
        ),
    }
}

/// Reports through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn plan_ready(&self, commands: usize) {
        tracing::info!(commands, "executing tasks");
    }

    fn script_skipped(&self, skip: &ScriptSkip) {
        tracing::warn!(path = %skip.path.display(), reason = %skip.reason, "script skipped");
    }

    fn command_finished(&self, result: &CommandResult) {
        let line = status_line(result);
        match result.status() {
            CommandStatus::Ok => tracing::info!("{}", line),
            CommandStatus::Warned => tracing::warn!("{}", line),
            CommandStatus::Failed => tracing::error!("{}", line),
        }
    }
}

/// Recorded report event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    PlanReady(usize),
    ScriptSkipped(ScriptSkip),
    CommandFinished(CommandResult),
}

/// Keeps every report for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Status lines of finished commands, in order
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::CommandFinished(result) => Some(status_line(result)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl Reporter for RecordingReporter {
    fn plan_ready(&self, commands: usize) {
        self.push(ReportEvent::PlanReady(commands));
    }

    fn script_skipped(&self, skip: &ScriptSkip) {
        self.push(ReportEvent::ScriptSkipped(skip.clone()));
    }

    fn command_finished(&self, result: &CommandResult) {
        self.push(ReportEvent::CommandFinished(result.clone()));
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
