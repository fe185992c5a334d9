// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server manager console adapters
//!
//! A console is one interactive child process with three separate streams.
//! Commands go in one line at a time; output comes back as raw chunks that
//! the engine assembles and interprets.

mod srvrmgr;

pub use srvrmgr::{SrvrmgrConsole, SrvrmgrLauncher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ConsoleCall, FakeConsole, FakeConsoleLauncher, FakeReply, FAKE_PROMPT};

use async_trait::async_trait;
use smr_core::params::MARKER;
use smr_core::TaskParams;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from console operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("sourcing server profile failed: {0}")]
    Profile(String),
    #[error("console input is closed")]
    InputClosed,
    #[error("no output on {stream} within {waited:?}")]
    OutputTimeout {
        stream: Stream,
        waited: std::time::Duration,
    },
    #[error("cancelled while waiting for console output")]
    Cancelled,
    #[error("console did not exit within {0:?}")]
    ExitTimeout(std::time::Duration),
    #[error("console exited abnormally (code {0:?})")]
    ExitFailed(Option<i32>),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Output stream of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// How to start a console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSpec {
    /// Console binary, a bare name is looked up on PATH
    pub program: String,
    pub gateway: String,
    pub enterprise: String,
    pub admin_user: String,
    /// Server installation directory holding the vendor profile
    pub sieb_path: PathBuf,
    /// Applied last over the prepared environment
    pub env_overrides: Vec<(String, String)>,
}

impl ConsoleSpec {
    pub fn from_params(params: &TaskParams) -> Self {
        Self {
            program: params.srvrmgr_bin.clone(),
            gateway: params.sieb_gateway.clone(),
            enterprise: params.sieb_enterprise.clone(),
            admin_user: params.admin_user.clone(),
            sieb_path: params.sieb_path.clone(),
            env_overrides: params.env_overrides(),
        }
    }

    /// Command-line arguments; `-k` turns on marker-delimited tables
    pub fn args(&self) -> Vec<String> {
        vec![
            "-g".to_string(),
            self.gateway.clone(),
            "-e".to_string(),
            self.enterprise.clone(),
            "-u".to_string(),
            self.admin_user.clone(),
            "-k".to_string(),
            MARKER.to_string(),
        ]
    }
}

/// How the console process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// None when terminated by a signal
    pub code: Option<i32>,
}

impl ExitReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// One running console
#[async_trait]
pub trait Console: Send {
    /// Write one line to the console's input and flush it
    async fn send_line(&mut self, line: &str) -> Result<(), ConsoleError>;

    /// Next chunk of a stream, or `None` once the stream has ended
    ///
    /// Cancel-safe: dropping the future loses no data.
    async fn recv(&mut self, stream: Stream) -> Option<Vec<u8>>;

    /// Close the input and wait for the process to exit
    async fn close(&mut self) -> Result<ExitReport, ConsoleError>;
}

/// Starts consoles
#[async_trait]
pub trait ConsoleLauncher: Clone + Send + Sync + 'static {
    type Console: Console;

    async fn open(&self, spec: &ConsoleSpec) -> Result<Self::Console, ConsoleError>;
}
