// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output checks for playbooks
//!
//! Conditions decide whether captured console text counts as a failure.

use crate::parser::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Column holding a component's display run state in `list comps` output
pub const RUN_STATE_COLUMN: &str = "CP_DISP_RUN_STATE";

/// Run states counted as active
pub const ACTIVE_STATES: [&str; 2] = ["Online", "Running"];

/// Comparison applied to the target text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CondKind {
    In,
    NotIn,
    Greater,
    Less,
    Equal,
    NotEqual,
    NotEmpty,
    Regex,
    Unknown(String),
}

impl From<String> for CondKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "in" => CondKind::In,
            "not in" => CondKind::NotIn,
            ">" => CondKind::Greater,
            "<" => CondKind::Less,
            "==" => CondKind::Equal,
            "!=" => CondKind::NotEqual,
            "not empty" => CondKind::NotEmpty,
            "regex" => CondKind::Regex,
            _ => CondKind::Unknown(s),
        }
    }
}

impl From<CondKind> for String {
    fn from(kind: CondKind) -> Self {
        match kind {
            CondKind::In => "in".to_string(),
            CondKind::NotIn => "not in".to_string(),
            CondKind::Greater => ">".to_string(),
            CondKind::Less => "<".to_string(),
            CondKind::Equal => "==".to_string(),
            CondKind::NotEqual => "!=".to_string(),
            CondKind::NotEmpty => "not empty".to_string(),
            CondKind::Regex => "regex".to_string(),
            CondKind::Unknown(s) => s,
        }
    }
}

/// One failure condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub cond: CondKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Condition {
    pub fn new(cond: &str, data: impl Into<String>) -> Self {
        Self {
            cond: CondKind::from(cond.to_string()),
            data: Some(data.into()),
        }
    }

    /// Whether `target` fails this condition
    pub fn holds(&self, target: &str) -> bool {
        let data = self.data.as_deref().unwrap_or_default();
        match &self.cond {
            CondKind::In => target.contains(data),
            CondKind::NotIn => !target.contains(data),
            CondKind::Greater => compare(target, data).is_gt(),
            CondKind::Less => compare(target, data).is_lt(),
            CondKind::Equal => target == data,
            CondKind::NotEqual => target != data,
            CondKind::NotEmpty => !target.is_empty(),
            CondKind::Regex => match Regex::new(data) {
                Ok(re) => re.is_match(target),
                Err(e) => {
                    tracing::warn!(pattern = data, error = %e, "invalid regex condition");
                    true
                }
            },
            CondKind::Unknown(name) => {
                tracing::warn!(cond = %name, "unknown condition");
                true
            }
        }
    }
}

// Numbers compare numerically, everything else as text
fn compare(target: &str, data: &str) -> std::cmp::Ordering {
    match (target.trim().parse::<f64>(), data.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
        _ => target.cmp(data),
    }
}

/// True when any condition holds for `target`
pub fn has_fails(target: &str, conds: &[Condition]) -> bool {
    for cond in conds {
        let result = cond.holds(target);
        tracing::trace!(cond = ?cond.cond, data = ?cond.data, result, "checked condition");
        if result {
            return true;
        }
    }
    false
}

/// Captured console streams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outs {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

/// Conditions per stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutConditions {
    #[serde(rename = "STDOUT", default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<Vec<Condition>>,
    #[serde(rename = "STDERR", default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<Vec<Condition>>,
}

/// Check stdout, then stderr; stops at the first failing stream
pub fn fails_in_outs(outs: &Outs, conds: &OutConditions) -> bool {
    [
        ("STDOUT", &outs.stdout, &conds.stdout),
        ("STDERR", &outs.stderr, &conds.stderr),
    ]
    .into_iter()
    .any(|(stream, target, conds)| match conds {
        Some(list) if !list.is_empty() => has_fails(target, list),
        Some(_) => {
            tracing::debug!(stream, "empty condition list");
            false
        }
        None => false,
    })
}

/// Table rows whose component is online or running
pub fn active_components(records: &[Record]) -> Vec<&BTreeMap<String, String>> {
    records
        .iter()
        .filter_map(Record::as_row)
        .filter(|row| {
            row.get(RUN_STATE_COLUMN)
                .is_some_and(|state| ACTIVE_STATES.contains(&state.as_str()))
        })
        .collect()
}

/// Whether `path` names anything on this host, following symlinks
pub fn path_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// The paths that do not exist, in input order
pub fn missing_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<&Path> {
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| !path_exists(path))
        .collect()
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
