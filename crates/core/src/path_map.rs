// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path remapping between hosts
//!
//! Maps paths listed in a file onto their locations on another host, using
//! prefix rules such as `/home/usr1/doc -> /usr/local/home/usr1/documents`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathMapError {
    #[error("could not read file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("there is no data in the file: {0}")]
    EmptyFile(PathBuf),
    #[error("mapping not found for \"{0}\" file")]
    NoMapping(String),
}

/// Replacement for one prefix: a single target or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapTarget {
    One(String),
    Many(Vec<String>),
}

impl MapTarget {
    fn targets(&self) -> &[String] {
        match self {
            MapTarget::One(t) => std::slice::from_ref(t),
            MapTarget::Many(ts) => ts,
        }
    }
}

pub type PathMapping = BTreeMap<String, MapTarget>;

/// Whitespace-separated paths from a file
pub fn load_path_list(path: &Path) -> Result<Vec<String>, PathMapError> {
    let content = std::fs::read_to_string(path).map_err(|source| PathMapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let paths: Vec<String> = content.split_whitespace().map(str::to_string).collect();
    if paths.is_empty() {
        return Err(PathMapError::EmptyFile(path.to_path_buf()));
    }
    Ok(paths)
}

/// Map every path through the deepest matching prefix
///
/// Returns the distinct mapped paths, sorted.
pub fn map_paths(paths: &[String], mapping: &PathMapping) -> Result<Vec<String>, PathMapError> {
    // Deepest prefixes first; ties broken by reverse lexical order
    let mut rules: Vec<(usize, &String, &MapTarget)> = mapping
        .iter()
        .map(|(prefix, target)| (prefix.split('/').count(), prefix, target))
        .collect();
    rules.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    let mut mapped = BTreeSet::new();
    for path in paths {
        let (prefix, target) = rules
            .iter()
            .find(|(_, prefix, _)| path.contains(prefix.as_str()))
            .map(|(_, prefix, target)| (*prefix, *target))
            .ok_or_else(|| PathMapError::NoMapping(path.clone()))?;
        for replacement in target.targets() {
            let result = path.replace(prefix.as_str(), replacement);
            tracing::trace!(from = %path, to = %result, "mapped path");
            mapped.insert(result);
        }
    }
    Ok(mapped.into_iter().collect())
}

#[cfg(test)]
#[path = "path_map_tests.rs"]
mod tests;
