// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr run <params>` - Execute a command stack against the console

use super::load_params;
use crate::adapters::make_runner;
use crate::error::SmrError;
use crate::output::print_json;
use crate::reporter::TerminalReporter;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code when a command of the stack failed
pub const COMMAND_FAILED: u8 = 1;

#[derive(Args)]
pub struct RunArgs {
    /// Task parameter file (.json or .toml)
    pub params: PathBuf,

    /// Copy scripts into this directory first (overrides staging_dir)
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,
}

pub async fn run(args: RunArgs) -> Result<ExitCode> {
    let mut params = load_params(&args.params)?;
    if let Some(dir) = args.staging_dir {
        params.staging_dir = Some(dir);
    }

    let runner = make_runner(&params, TerminalReporter);
    let cancel = runner.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling the current command");
            cancel.cancel();
        }
    });

    let result = runner.run(&params).await;
    interrupt.abort();
    let outcome = result.map_err(SmrError::run)?;

    // Second pass over the whole outcome, the way it will be shown
    print_json(&params.creds.redact_serialized(&outcome)?)?;

    if outcome.failed {
        if let Some(msg) = &outcome.msg {
            eprintln!("{}", msg);
        }
        Ok(ExitCode::from(COMMAND_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
