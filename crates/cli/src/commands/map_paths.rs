// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr map-paths <paths-file> --mapping <file>` - Remap paths for another host

use super::read_structured;
use crate::output::{print_list, OutputFormat};
use anyhow::Result;
use clap::Args;
use smr_core::path_map::load_path_list;
use smr_core::{map_paths as map_all, PathMapping};
use std::path::PathBuf;

#[derive(Args)]
pub struct MapPathsArgs {
    /// File with whitespace-separated paths
    pub paths_file: PathBuf,

    /// Prefix mapping file: prefix to a target or a list of targets
    #[arg(long, short)]
    pub mapping: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn map_paths(args: MapPathsArgs) -> Result<()> {
    let mapping: PathMapping = read_structured(&args.mapping)?;
    let paths = load_path_list(&args.paths_file)?;
    print_list(&map_all(&paths, &mapping)?, args.format)
}
