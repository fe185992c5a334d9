// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every error shown to the operator says:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use smr_adapters::{ConsoleError, StageError};
use smr_core::ParamsError;
use smr_engine::RunError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct SmrError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SmrError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for SmrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for SmrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl SmrError {
    /// Error for a parameter file that cannot be loaded or is invalid.
    pub fn params(path: &Path, err: ParamsError) -> Self {
        let base = SmrError::new(format!("Invalid task parameters in {}", path.display()));
        let with_detail = match &err {
            ParamsError::Invalid(problems) => problems
                .iter()
                .fold(base, |e, problem| e.with_context(problem.clone())),
            other => base.with_context(other.to_string()),
        };
        with_detail
            .with_suggestion("Required keys: cmd_stack, creds.sadmin_pw, sieb_path, sieb_gateway, sieb_enterprise")
            .with_suggestion(format!("Check the plan without a console: smr plan {}", path.display()))
            .with_source(err)
    }

    /// Error for a run that failed before or around command execution.
    pub fn run(err: RunError) -> Self {
        let base = SmrError::new(format!("Task did not run: {}", err));
        let hinted = match &err {
            RunError::Params(_) | RunError::Stack(_) => base,
            RunError::Stage(StageError::MissingDir(dir)) => base
                .with_context(format!("{} does not exist", dir.display()))
                .with_suggestion("Create the staging directory or drop staging_dir to read scripts in place"),
            RunError::Stage(_) => base.with_suggestion("Check that every script is readable"),
            RunError::Console(console) => match console {
                ConsoleError::SpawnFailed(_) => base
                    .with_context("The console binary could not be started")
                    .with_suggestion("Set srvrmgr_bin to the full path of the srvrmgr binary"),
                ConsoleError::Profile(_) => base
                    .with_context("siebenv.sh could not be sourced")
                    .with_suggestion("Point sieb_path at the server installation directory"),
                ConsoleError::OutputTimeout { .. } => base
                    .with_context("The console stopped answering")
                    .with_suggestion("Raise timeouts.output for long-running commands"),
                ConsoleError::ExitTimeout(_) => base
                    .with_context("The console did not exit after its input was closed")
                    .with_suggestion("Raise timeouts.exit or check the server manager host"),
                ConsoleError::Cancelled => base.with_context("Interrupted by the operator"),
                ConsoleError::InputClosed
                | ConsoleError::ExitFailed(_)
                | ConsoleError::Io(_) => base,
            },
        };
        hinted.with_source(err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
