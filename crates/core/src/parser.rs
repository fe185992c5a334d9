// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console output parsing
//!
//! The console answers in one of three shapes:
//! - the login banner, which starts with `Password:` and ends with a
//!   `Connected to N server(s) out of a total of M server(s)` line
//! - a table, when columns are delimited by [`MARKER`]
//! - free text, kept line by line

use crate::params::MARKER;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// First token of the login banner
pub const PASSWORD_PROMPT: &str = "Password:";

// Regex pattern for the connection summary - this is a constant valid pattern
#[allow(clippy::expect_used)]
static BANNER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Connected to (?P<available_servers>\d+).*total of (?P<total_servers>\d+)")
        .expect("constant regex pattern is valid")
});

/// One structured item of console output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// Connection summary printed after login
    Banner {
        available_servers: String,
        total_servers: String,
    },
    /// One table row, keyed by column header
    Row(BTreeMap<String, String>),
    /// One non-empty line of free text
    Line(String),
}

impl Record {
    pub fn as_row(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Record::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&str> {
        match self {
            Record::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Parse one drained output blob
pub fn parse(blob: &str) -> Vec<Record> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    if blob.split_whitespace().next() == Some(PASSWORD_PROMPT) {
        return parse_banner(blob).into_iter().collect();
    }
    if blob.contains(MARKER) {
        return parse_table(blob);
    }
    blob.split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| Record::Line(line.to_string()))
        .collect()
}

/// The summary sits on the second-to-last line (the last one is what follows the final newline)
fn parse_banner(blob: &str) -> Option<Record> {
    let lines: Vec<&str> = blob.split('\n').collect();
    let summary = lines.len().checked_sub(2).map(|i| lines[i])?;
    let caps = BANNER_PATTERN.captures(summary)?;
    Some(Record::Banner {
        available_servers: caps["available_servers"].to_string(),
        total_servers: caps["total_servers"].to_string(),
    })
}

/// Header row, a rule line, then data rows
///
/// A trailing line without the marker (the console's `N rows returned.`
/// summary) is not a row. Rows shorter than the header drop the unmatched
/// trailing columns.
fn parse_table(blob: &str) -> Vec<Record> {
    let lines: Vec<&str> = blob
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let Some(header) = lines.first() else {
        return Vec::new();
    };
    let fields: Vec<&str> = header
        .split(MARKER)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();

    let mut end = lines.len();
    if end > 2 && lines.last().is_some_and(|last| !last.contains(MARKER)) {
        end -= 1;
    }

    lines
        .get(2..end)
        .unwrap_or_default()
        .iter()
        .map(|line| {
            Record::Row(
                fields
                    .iter()
                    .zip(line.split(MARKER).map(str::trim))
                    .map(|(field, value)| (field.to_string(), value.to_string()))
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
