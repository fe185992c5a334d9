// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `smr completions <shell>` - Completion scripts for the operator's shell
//!
//! Completes subcommands and flags such as `run --staging-dir`,
//! `plan --format` and `check --exists`. Install the script where the shell
//! looks for it, e.g. `smr completions bash > ~/.local/share/bash-completion/completions/smr`.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Binary name the completion script registers for
const BIN_NAME: &str = "smr";

/// Print the completion script for `shell` to stdout
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
}

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// bash, zsh, fish, elvish or powershell
    #[arg(value_enum)]
    pub shell: Shell,
}
