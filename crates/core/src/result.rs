// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command results

use crate::parser::{parse, Record};
use crate::stack::READ_DIRECTIVE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One console stream after a command, raw and structured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBlock {
    pub raw: String,
    pub lines: Vec<String>,
    pub parsed: Vec<Record>,
}

impl OutputBlock {
    /// Build a block from raw text; `None` when there is no text at all
    pub fn from_raw(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            lines: raw.split('\n').map(str::to_string).collect(),
            parsed: parse(raw),
        })
    }
}

/// Outcome of one command of the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<OutputBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<OutputBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn: Option<OutputBlock>,
}

/// How a command ended, for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    Warned,
    Failed,
}

impl CommandResult {
    pub fn new(command: &str, out: &str, err: &str, warn: &str) -> Self {
        Self {
            cmd: display_command(command),
            out: OutputBlock::from_raw(out),
            err: OutputBlock::from_raw(err),
            warn: OutputBlock::from_raw(warn),
        }
    }

    pub fn status(&self) -> CommandStatus {
        if self.err.is_some() {
            CommandStatus::Failed
        } else if self.warn.is_some() {
            CommandStatus::Warned
        } else {
            CommandStatus::Ok
        }
    }

    /// Warning lines worth showing, without the leading echo line
    pub fn warning_lines(&self) -> Vec<String> {
        self.warn
            .as_ref()
            .map(|w| {
                w.parsed
                    .iter()
                    .skip(1)
                    .map(|r| match r {
                        Record::Line(line) => line.clone(),
                        other => serde_json::to_string(other).unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Name shown for a command: script base name for `read <path>`, else the text itself
pub fn display_command(command: &str) -> String {
    let mut parts = command.split_whitespace();
    if parts.next() == Some(READ_DIRECTIVE) {
        if let Some(path) = parts.next() {
            return Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
        }
    }
    command.to_string()
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
