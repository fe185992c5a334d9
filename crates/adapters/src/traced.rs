// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability
//!
//! Console input may carry the admin password, so only its length is logged.

use crate::console::{Console, ConsoleError, ConsoleLauncher, ConsoleSpec, ExitReport, Stream};
use crate::stage::{StageError, Stager};
use async_trait::async_trait;
use smr_core::PriorityKey;
use std::path::Path;

/// Wrapper that adds tracing to any ConsoleLauncher
#[derive(Clone)]
pub struct TracedConsoleLauncher<L> {
    inner: L,
}

impl<L> TracedConsoleLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: ConsoleLauncher> ConsoleLauncher for TracedConsoleLauncher<L> {
    type Console = TracedConsole<L::Console>;

    async fn open(&self, spec: &ConsoleSpec) -> Result<Self::Console, ConsoleError> {
        let span = tracing::info_span!(
            "console.open",
            gateway = %spec.gateway,
            enterprise = %spec.enterprise,
            user = %spec.admin_user,
        );
        let _guard = span.enter();

        tracing::info!(program = %spec.program, env_count = spec.env_overrides.len(), "starting");

        // Precondition: an explicit binary path must exist
        if spec.program.contains('/') && !Path::new(&spec.program).exists() {
            tracing::error!("console binary does not exist");
            return Err(ConsoleError::SpawnFailed(format!(
                "console binary does not exist: {}",
                spec.program
            )));
        }

        // Precondition: the installation directory must exist
        if !spec.sieb_path.is_dir() {
            tracing::error!("installation directory does not exist");
            return Err(ConsoleError::Profile(format!(
                "installation directory does not exist: {}",
                spec.sieb_path.display()
            )));
        }

        let start = std::time::Instant::now();
        let result = self.inner.open(spec).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "console started"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "open failed"
            ),
        }

        result.map(TracedConsole::new)
    }
}

/// Wrapper that adds tracing to any Console
pub struct TracedConsole<C> {
    inner: C,
}

impl<C> TracedConsole<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: Console> Console for TracedConsole<C> {
    async fn send_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        let span = tracing::debug_span!("console.send");
        let _guard = span.enter();

        tracing::debug!(input_len = line.len(), "sending");
        let result = self.inner.send_line(line).await;

        match &result {
            Ok(()) => tracing::debug!("sent"),
            Err(e) => tracing::error!(error = %e, "send failed"),
        }

        result
    }

    async fn recv(&mut self, stream: Stream) -> Option<Vec<u8>> {
        let result = self.inner.recv(stream).await;
        match &result {
            Some(chunk) => tracing::trace!(%stream, len = chunk.len(), "console.recv"),
            None => tracing::debug!(%stream, "stream ended"),
        }
        result
    }

    async fn close(&mut self) -> Result<ExitReport, ConsoleError> {
        let span = tracing::info_span!("console.close");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.close().await;
        let elapsed = start.elapsed();

        match &result {
            Ok(report) if report.success() => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "console exited")
            }
            Ok(report) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                code = ?report.code,
                "console exited abnormally"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "close failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any Stager
#[derive(Clone)]
pub struct TracedStager<S> {
    inner: S,
}

impl<S> TracedStager<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: Stager> Stager for TracedStager<S> {
    async fn stage(&self, key: &PriorityKey, local: &Path) -> Result<String, StageError> {
        let span = tracing::info_span!("stage.copy", %key, local = %local.display());
        let _guard = span.enter();

        // Precondition: the script must still be there
        if !local.is_file() {
            tracing::error!("script does not exist");
            return Err(StageError::Copy {
                path: local.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "script does not exist"),
            });
        }

        let start = std::time::Instant::now();
        let result = self.inner.stage(key, local).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(remote) => tracing::info!(
                remote = %remote,
                elapsed_ms = elapsed.as_millis() as u64,
                "script staged"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "staging failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
