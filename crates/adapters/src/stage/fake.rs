// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake stager for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{StageError, Stager};
use async_trait::async_trait;
use smr_core::PriorityKey;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded staging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCall {
    pub key: PriorityKey,
    pub local: PathBuf,
}

/// Fake stager that maps every script to `<remote_dir>/<file name>`
#[derive(Clone)]
pub struct FakeStager {
    remote_dir: String,
    fail_on: Arc<Mutex<Option<PathBuf>>>,
    calls: Arc<Mutex<Vec<StageCall>>>,
}

impl Default for FakeStager {
    fn default() -> Self {
        Self::new("/tmp/staged")
    }
}

impl FakeStager {
    pub fn new(remote_dir: impl Into<String>) -> Self {
        Self {
            remote_dir: remote_dir.into(),
            fail_on: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make staging of `local` fail
    pub fn fail_on(&self, local: impl Into<PathBuf>) {
        *self.fail_on.lock().unwrap_or_else(|e| e.into_inner()) = Some(local.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StageCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Stager for FakeStager {
    async fn stage(&self, key: &PriorityKey, local: &Path) -> Result<String, StageError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StageCall {
                key: key.clone(),
                local: local.to_path_buf(),
            });

        let failing = self.fail_on.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if failing.as_deref() == Some(local) {
            return Err(StageError::Copy {
                path: local.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }

        let name = local
            .file_name()
            .ok_or_else(|| StageError::NoFileName(local.to_path_buf()))?;
        Ok(format!("{}/{}", self.remote_dir, name.to_string_lossy()))
    }
}
