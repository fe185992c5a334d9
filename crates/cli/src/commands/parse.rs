// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr parse [file]` - Turn captured console output into records

use super::read_text;
use crate::output::print_json;
use anyhow::Result;
use clap::Args;
use smr_core::checks::active_components;
use smr_core::parse as parse_output;
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseArgs {
    /// Captured output; stdin when omitted
    pub file: Option<PathBuf>,

    /// Keep only table rows of components that are online or running
    #[arg(long)]
    pub active: bool,
}

pub fn parse(args: ParseArgs) -> Result<()> {
    let blob = read_text(args.file.as_deref())?;
    let records = parse_output(&blob);
    if args.active {
        print_json(&active_components(&records))
    } else {
        print_json(&records)
    }
}
