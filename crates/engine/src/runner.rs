// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task runner
//!
//! One run: validate parameters, resolve and stage the command stack, then
//! feed the console the admin password, every planned command and `quit`,
//! stopping at the first command that fails.

use crate::driver::ConsoleDriver;
use crate::error::RunError;
use crate::report::Reporter;
use serde::Serialize;
use smr_adapters::{Console, ConsoleError, ConsoleLauncher, ConsoleSpec, Stager};
use smr_core::{
    resolve, CommandResult, CommandStatus, ParamsError, ResolvedStack, ScriptSkip, TaskParams,
};
use tokio_util::sync::CancellationToken;

/// Last command of every session
pub const QUIT_COMMAND: &str = "quit";

/// Result of a run, with every secret redacted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub changed: bool,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    pub results: Vec<CommandResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_lines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<ScriptSkip>,
}

/// Runner adapter dependencies
pub struct RunnerDeps<L, S, R> {
    pub launcher: L,
    pub stager: S,
    pub reporter: R,
}

/// Runs command stacks against the console
pub struct Runner<L, S, R> {
    launcher: L,
    stager: S,
    reporter: R,
    cancel: CancellationToken,
}

impl<L, S, R> Runner<L, S, R>
where
    L: ConsoleLauncher,
    S: Stager,
    R: Reporter,
{
    pub fn new(deps: RunnerDeps<L, S, R>) -> Self {
        Self {
            launcher: deps.launcher,
            stager: deps.stager,
            reporter: deps.reporter,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` to interrupt output waits
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validate parameters and resolve the stack without touching the console
    pub fn plan(&self, params: &TaskParams) -> Result<ResolvedStack, RunError> {
        params.validate()?;
        let filter = params
            .filter_regex()
            .map_err(|e| ParamsError::Invalid(vec![e]))?;
        let stack = resolve(&params.cmd_stack, &params.creds, filter.as_ref());
        for skip in &stack.skipped {
            self.reporter.script_skipped(skip);
        }
        Ok(stack)
    }

    /// Execute the whole task
    pub async fn run(&self, params: &TaskParams) -> Result<TaskOutcome, RunError> {
        let span = tracing::info_span!(
            "task.run",
            gateway = %params.sieb_gateway,
            enterprise = %params.sieb_enterprise,
        );
        let _guard = span.enter();

        let mut stack = self.plan(params)?;

        let files: Vec<_> = stack
            .files
            .iter()
            .map(|(key, path)| (key.clone(), path.clone()))
            .collect();
        for (key, local) in files {
            let remote = self.stager.stage(&key, &local).await?;
            stack.stage(&key, &remote);
        }
        let commands = stack.commands()?;
        self.reporter.plan_ready(commands.len());

        let console = self.launcher.open(&ConsoleSpec::from_params(params)).await?;
        let mut driver = ConsoleDriver::new(
            console,
            params.creds.sadmin_pw.clone(),
            params.skip_errors.clone(),
            params.timeouts,
            self.cancel.clone(),
        );

        let mut lines = Vec::with_capacity(commands.len() + 2);
        lines.push(params.creds.sadmin_pw.clone());
        lines.extend(commands.into_iter().map(|(_, command)| command));
        lines.push(QUIT_COMMAND.to_string());

        let executed = self.execute(&mut driver, params, &lines).await;
        let closed = driver.close().await;

        let mut outcome = match (executed, closed) {
            (Ok(outcome), Ok(_)) => outcome,
            (Ok(outcome), Err(e)) if outcome.failed => {
                tracing::warn!(error = %e, "console did not shut down cleanly after failure");
                outcome
            }
            (Ok(_), Err(e)) => return Err(e.into()),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    tracing::warn!(error = %close_err, "console did not shut down cleanly");
                }
                return Err(e.into());
            }
        };
        outcome.skipped = stack.skipped;
        Ok(outcome)
    }

    async fn execute<C: Console>(
        &self,
        driver: &mut ConsoleDriver<C>,
        params: &TaskParams,
        lines: &[String],
    ) -> Result<TaskOutcome, ConsoleError> {
        let creds = &params.creds;
        let mut outcome = TaskOutcome::default();

        for line in lines {
            let raw = driver.exec(line).await?;
            let result = CommandResult::new(
                &creds.redact_str(line),
                &creds.redact_str(&raw.out),
                &creds.redact_str(&raw.err),
                &creds.redact_str(&raw.warn),
            );
            self.reporter.command_finished(&result);
            let failed = result.status() == CommandStatus::Failed;
            outcome.results.push(result);
            outcome.changed = true;

            if failed {
                let stderr = creds.redact_str(&raw.err);
                tracing::error!(command = %creds.redact_str(line), "command failed, stopping");
                outcome.changed = false;
                outcome.failed = true;
                outcome.msg = Some(format!("Error on execute: {}", creds.redact_str(line)));
                outcome.stderr_lines = Some(stderr.split('\n').map(str::to_string).collect());
                outcome.stderr = Some(stderr);
                break;
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
