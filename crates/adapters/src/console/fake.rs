// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake console for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Console, ConsoleError, ConsoleLauncher, ConsoleSpec, ExitReport, Stream};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Prompt the console prints after every command
pub const FAKE_PROMPT: &str = "\nsrvrmgr> ";

/// Recorded console call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCall {
    Open { spec: ConsoleSpec },
    Send { line: String },
    Close,
}

/// Scripted reply to one input line
#[derive(Debug, Clone)]
pub struct FakeReply {
    stdout: Vec<String>,
    stderr: Vec<String>,
    prompt: bool,
}

impl Default for FakeReply {
    fn default() -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            prompt: true,
        }
    }
}

impl FakeReply {
    /// Stdout text, followed by the prompt
    pub fn out(text: impl Into<String>) -> Self {
        Self {
            stdout: vec![text.into()],
            ..Self::default()
        }
    }

    /// Stdout delivered as separate chunks, followed by the prompt
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stdout: chunks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add stderr text
    pub fn with_err(mut self, text: impl Into<String>) -> Self {
        self.stderr.push(text.into());
        self
    }

    /// Nothing at all on stdout, not even the prompt
    pub fn silent() -> Self {
        Self {
            prompt: false,
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct LauncherState {
    replies: HashMap<String, FakeReply>,
    fail_open: Option<String>,
    exit_code: i32,
    hang_on_close: bool,
}

/// Fake console launcher for testing
#[derive(Clone, Default)]
pub struct FakeConsoleLauncher {
    state: Arc<Mutex<LauncherState>>,
    calls: Arc<Mutex<Vec<ConsoleCall>>>,
}

impl FakeConsoleLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for an input line
    pub fn on(&self, line: impl Into<String>, reply: FakeReply) -> &Self {
        self.lock_state().replies.insert(line.into(), reply);
        self
    }

    /// Make the next `open` fail
    pub fn fail_open(&self, reason: impl Into<String>) {
        self.lock_state().fail_open = Some(reason.into());
    }

    /// Exit code reported on close (default 0)
    pub fn set_exit_code(&self, code: i32) {
        self.lock_state().exit_code = code;
    }

    /// Make `close` never complete
    pub fn hang_on_close(&self) {
        self.lock_state().hang_on_close = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Lines sent to the console, in order
    pub fn sent_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ConsoleCall::Send { line } => Some(line),
                _ => None,
            })
            .collect()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LauncherState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ConsoleLauncher for FakeConsoleLauncher {
    type Console = FakeConsole;

    async fn open(&self, spec: &ConsoleSpec) -> Result<FakeConsole, ConsoleError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ConsoleCall::Open { spec: spec.clone() });

        if let Some(reason) = self.lock_state().fail_open.take() {
            return Err(ConsoleError::SpawnFailed(reason));
        }

        Ok(FakeConsole {
            launcher: self.clone(),
            stdout: VecDeque::new(),
            stderr: VecDeque::new(),
            exited: false,
        })
    }
}

/// Console whose output is scripted by its launcher
pub struct FakeConsole {
    launcher: FakeConsoleLauncher,
    stdout: VecDeque<Vec<u8>>,
    stderr: VecDeque<Vec<u8>>,
    exited: bool,
}

#[async_trait]
impl Console for FakeConsole {
    async fn send_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        if self.exited {
            return Err(ConsoleError::InputClosed);
        }
        self.launcher
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ConsoleCall::Send {
                line: line.to_string(),
            });

        // Quit ends the session: no prompt unless one is scripted
        let quitting = line == "quit";
        let reply = match self.launcher.lock_state().replies.get(line).cloned() {
            Some(reply) => reply,
            None if quitting => FakeReply::silent(),
            None => FakeReply::default(),
        };
        self.stdout
            .extend(reply.stdout.iter().map(|c| c.as_bytes().to_vec()));
        if reply.prompt {
            self.stdout.push_back(FAKE_PROMPT.as_bytes().to_vec());
        }
        self.stderr
            .extend(reply.stderr.iter().map(|c| c.as_bytes().to_vec()));
        self.exited = quitting;
        Ok(())
    }

    async fn recv(&mut self, stream: Stream) -> Option<Vec<u8>> {
        let queue = match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        };
        if let Some(chunk) = queue.pop_front() {
            return Some(chunk);
        }
        if self.exited {
            return None;
        }
        std::future::pending().await
    }

    async fn close(&mut self) -> Result<ExitReport, ConsoleError> {
        self.launcher
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ConsoleCall::Close);
        self.exited = true;

        let (hang, code) = {
            let state = self.launcher.lock_state();
            (state.hang_on_close, state.exit_code)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(ExitReport { code: Some(code) })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
