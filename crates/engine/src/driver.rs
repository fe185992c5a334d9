// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console driver
//!
//! Runs one command at a time against a console: write the line, wait for
//! output, drain both streams, then clean and classify what came back.

use smr_adapters::{Console, ConsoleError, ExitReport, Stream};
use smr_core::{mask_password, Timeouts};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Prompt echo the console appends to every response
pub const PROMPT_ECHO: &str = "\nsrvrmgr> ";

/// Cleaned output of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub out: String,
    pub err: String,
    /// Error text demoted by the skip-list
    pub warn: String,
}

impl RawOutput {
    /// Demote `err` to `warn` when it contains any skip-list entry
    pub fn classify(out: String, err: String, skip_errors: &[String]) -> Self {
        let skipped = skip_errors
            .iter()
            .filter(|code| !code.is_empty())
            .any(|code| err.contains(code.as_str()));
        if skipped {
            Self {
                out,
                err: String::new(),
                warn: err,
            }
        } else {
            Self {
                out,
                err,
                warn: String::new(),
            }
        }
    }

    /// Non-empty error text after reclassification halts the stack
    pub fn is_failure(&self) -> bool {
        !self.err.is_empty()
    }
}

/// Drives one console session
pub struct ConsoleDriver<C> {
    console: C,
    password: String,
    skip_errors: Vec<String>,
    timeouts: Timeouts,
    cancel: CancellationToken,
}

impl<C: Console> ConsoleDriver<C> {
    pub fn new(
        console: C,
        password: impl Into<String>,
        skip_errors: Vec<String>,
        timeouts: Timeouts,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            console,
            password: password.into(),
            skip_errors,
            timeouts,
            cancel,
        }
    }

    /// Run one command and collect its output
    pub async fn exec(&mut self, command: &str) -> Result<RawOutput, ConsoleError> {
        self.console.send_line(command).await?;

        let out = self.read_stdout().await?;
        let err = self.drain(Stream::Stderr, Vec::new()).await?;

        let out = mask_password(&out.replace(PROMPT_ECHO, ""), &self.password);
        let err = mask_password(&err, &self.password);
        Ok(RawOutput::classify(out, err, &self.skip_errors))
    }

    /// Close the input and wait for the console to exit
    pub async fn close(&mut self) -> Result<ExitReport, ConsoleError> {
        let waited = self.timeouts.exit;
        let report = tokio::time::timeout(waited, self.console.close())
            .await
            .map_err(|_| ConsoleError::ExitTimeout(waited))??;
        if report.success() {
            Ok(report)
        } else {
            Err(ConsoleError::ExitFailed(report.code))
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Wait for the first stdout chunk, then drain the rest
    async fn read_stdout(&mut self) -> Result<String, ConsoleError> {
        let waited = self.timeouts.output;
        let first = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ConsoleError::Cancelled),
            chunk = tokio::time::timeout(waited, self.console.recv(Stream::Stdout)) => chunk,
        };
        match first {
            Err(_) => Err(ConsoleError::OutputTimeout {
                stream: Stream::Stdout,
                waited,
            }),
            // Ended without output, e.g. after quit
            Ok(None) => Ok(String::new()),
            Ok(Some(chunk)) => self.drain(Stream::Stdout, chunk).await,
        }
    }

    /// Read until the stream is quiet for one window or ends
    async fn drain(&mut self, stream: Stream, mut buf: Vec<u8>) -> Result<String, ConsoleError> {
        let quiet: Duration = self.timeouts.quiet;
        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => return Err(ConsoleError::Cancelled),
                chunk = tokio::time::timeout(quiet, self.console.recv(stream)) => chunk,
            };
            match next {
                Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
                Ok(None) | Err(_) => break,
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
