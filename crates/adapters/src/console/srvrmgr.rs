// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process console

use super::{Console, ConsoleError, ConsoleLauncher, ConsoleSpec, ExitReport, Stream};
use crate::profile::source_profile;
use async_trait::async_trait;
use smr_core::env::prepare_env;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const READ_BUFFER_SIZE: usize = 8192;

/// Launches the vendor console as a child process
#[derive(Clone, Default)]
pub struct SrvrmgrLauncher;

impl SrvrmgrLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConsoleLauncher for SrvrmgrLauncher {
    type Console = SrvrmgrConsole;

    async fn open(&self, spec: &ConsoleSpec) -> Result<SrvrmgrConsole, ConsoleError> {
        let profile = source_profile(&spec.sieb_path).await?;
        let env = prepare_env(std::env::vars(), &profile, &spec.env_overrides);

        let mut child = Command::new(&spec.program)
            .args(spec.args())
            .env_clear()
            .envs(&env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConsoleError::SpawnFailed(format!("{}: {}", spec.program, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConsoleError::SpawnFailed("stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ConsoleError::SpawnFailed("stdout not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ConsoleError::SpawnFailed("stderr not captured".to_string()))?;

        let (stdout_tx, stdout_rx) = mpsc::unbounded_channel();
        let (stderr_tx, stderr_rx) = mpsc::unbounded_channel();
        let readers = vec![
            forward(stdout, stdout_tx, Stream::Stdout),
            forward(stderr, stderr_tx, Stream::Stderr),
        ];

        Ok(SrvrmgrConsole {
            child,
            stdin: Some(stdin),
            stdout_rx,
            stderr_rx,
            readers,
        })
    }
}

/// Pump a child stream into a channel until EOF
fn forward<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>, stream: Stream) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(%stream, error = %e, "console stream read failed");
                    break;
                }
            }
        }
    })
}

/// A running console child process
pub struct SrvrmgrConsole {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    stderr_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    readers: Vec<JoinHandle<()>>,
}

impl SrvrmgrConsole {
    /// OS process id, while the process is running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}

#[async_trait]
impl Console for SrvrmgrConsole {
    async fn send_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        let stdin = self.stdin.as_mut().ok_or(ConsoleError::InputClosed)?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        Ok(())
    }

    async fn recv(&mut self, stream: Stream) -> Option<Vec<u8>> {
        match stream {
            Stream::Stdout => self.stdout_rx.recv().await,
            Stream::Stderr => self.stderr_rx.recv().await,
        }
    }

    async fn close(&mut self) -> Result<ExitReport, ConsoleError> {
        // Dropping stdin sends EOF
        self.stdin.take();
        let status = self.child.wait().await?;
        for reader in self.readers.drain(..) {
            if let Err(e) = reader.await {
                tracing::warn!(error = %e, "console reader task failed");
            }
        }
        Ok(ExitReport {
            code: status.code(),
        })
    }
}

#[cfg(test)]
#[path = "srvrmgr_tests.rs"]
mod tests;
