// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script staging adapters
//!
//! Resolved scripts are made readable by the console before the stack runs.
//! A stager returns the path the console's `read` directive should use.

use async_trait::async_trait;
use smr_core::PriorityKey;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStager, StageCall};

/// Errors from staging operations
#[derive(Debug, Error)]
pub enum StageError {
    #[error("staging {path} failed: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("staging directory does not exist: {0}")]
    MissingDir(PathBuf),
    #[error("script has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Makes a local script available to the console
#[async_trait]
pub trait Stager: Clone + Send + Sync + 'static {
    /// Stage the script at `key` and return the path the console reads it from
    async fn stage(&self, key: &PriorityKey, local: &Path) -> Result<String, StageError>;
}

/// Reads scripts where they already are
#[derive(Clone, Default)]
pub struct InPlaceStager;

impl InPlaceStager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Stager for InPlaceStager {
    async fn stage(&self, _key: &PriorityKey, local: &Path) -> Result<String, StageError> {
        Ok(local.display().to_string())
    }
}

/// Copies scripts into a staging directory
///
/// Each script lands in a sub-directory named after its key, so scripts
/// sharing a file name do not overwrite each other.
#[derive(Clone)]
pub struct DirStager {
    dir: PathBuf,
}

impl DirStager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Stager for DirStager {
    async fn stage(&self, key: &PriorityKey, local: &Path) -> Result<String, StageError> {
        let name = local
            .file_name()
            .ok_or_else(|| StageError::NoFileName(local.to_path_buf()))?;
        if !tokio::fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Err(StageError::MissingDir(self.dir.clone()));
        }
        let slot = self.dir.join(key.to_string());
        let copy_err = |source| StageError::Copy {
            path: local.to_path_buf(),
            source,
        };
        tokio::fs::create_dir_all(&slot).await.map_err(copy_err)?;
        let target = slot.join(name);
        tokio::fs::copy(local, &target)
            .await
            .map_err(copy_err)?;
        Ok(target.display().to_string())
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
