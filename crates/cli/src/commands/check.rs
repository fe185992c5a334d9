// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr check [conditions] [--exists <path>]...` - Evaluate failure conditions
//! against captured output and require files to be present

use super::read_structured;
use anyhow::{Context, Result};
use clap::Args;
use smr_core::{fails_in_outs, missing_paths, OutConditions, Outs};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code when a condition holds or a required path is missing
pub const FAILS_FOUND: u8 = 1;

#[derive(Args)]
pub struct CheckArgs {
    /// Condition file with optional STDOUT and STDERR lists
    #[arg(required_unless_present = "exists")]
    pub conditions: Option<PathBuf>,

    /// Path that must exist (repeatable)
    #[arg(long, value_name = "PATH")]
    pub exists: Vec<PathBuf>,

    /// Captured standard output
    #[arg(long)]
    pub stdout: Option<PathBuf>,

    /// Captured standard error
    #[arg(long)]
    pub stderr: Option<PathBuf>,
}

fn read_or_empty(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => Ok(String::new()),
    }
}

pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let missing = missing_paths(&args.exists);
    for path in &missing {
        println!("missing: {}", path.display());
    }

    let fails = match &args.conditions {
        Some(conditions) => {
            let conds: OutConditions = read_structured(conditions)?;
            let outs = Outs {
                stdout: read_or_empty(args.stdout.as_deref())?,
                stderr: read_or_empty(args.stderr.as_deref())?,
            };
            fails_in_outs(&outs, &conds)
        }
        None => false,
    };

    if fails {
        println!("fails found");
    }
    if fails || !missing.is_empty() {
        Ok(ExitCode::from(FAILS_FOUND))
    } else {
        println!("ok");
        Ok(ExitCode::SUCCESS)
    }
}
