// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr plan <params>` - Show the resolved command stack without running it

use super::load_params;
use crate::adapters::make_runner;
use crate::error::SmrError;
use crate::output::{print_list, OutputFormat};
use crate::reporter::TerminalReporter;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use smr_core::{PlanEntry, PriorityKey, ResolvedStack};
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct PlanArgs {
    /// Task parameter file (.json or .toml)
    pub params: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One planned step
#[derive(Debug, Serialize)]
pub struct PlanStep {
    pub key: PriorityKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.command, &self.script) {
            (_, Some(script)) => write!(f, "{}\tscript {}", self.key, script.display()),
            (Some(command), None) => write!(f, "{}\t{}", self.key, command),
            (None, None) => write!(f, "{}", self.key),
        }
    }
}

/// Steps in execution order; commands are redacted by `redact`
pub fn steps(stack: &ResolvedStack, redact: impl Fn(&str) -> String) -> Vec<PlanStep> {
    stack
        .plan
        .iter()
        .map(|(key, entry)| match entry {
            PlanEntry::Command(text) => PlanStep {
                key: key.clone(),
                command: Some(redact(text)),
                script: None,
            },
            PlanEntry::Pending => PlanStep {
                key: key.clone(),
                command: None,
                script: stack.files.get(key).cloned(),
            },
        })
        .collect()
}

pub fn plan(args: PlanArgs) -> Result<()> {
    let params = load_params(&args.params)?;
    let stack = make_runner(&params, TerminalReporter)
        .plan(&params)
        .map_err(SmrError::run)?;
    print_list(&steps(&stack, |text| params.creds.redact_str(text)), args.format)
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
