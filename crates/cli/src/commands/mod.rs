// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod map_paths;
pub mod parse;
pub mod plan;
pub mod run;

use crate::error::SmrError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use smr_core::TaskParams;
use std::path::Path;

/// Load and validate a task parameter file
pub fn load_params(path: &Path) -> Result<TaskParams, SmrError> {
    let params = TaskParams::load(path).map_err(|e| SmrError::params(path, e))?;
    params.validate().map_err(|e| SmrError::params(path, e))?;
    Ok(params)
}

/// Read a `.toml` file, or JSON for any other extension
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

/// Whole file, or stdin when no path is given
pub fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("cannot read stdin"),
    }
}
