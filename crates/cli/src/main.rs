// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! smr - Siebel server manager task runner

mod adapters;
mod commands;
mod completions;
mod error;
mod logging;
mod output;
mod reporter;

use clap::{Parser, Subcommand};
use commands::{check, map_paths, parse, plan, run};
use completions::CompletionsArgs;
use error::SmrError;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for configuration and console lifecycle errors
const SETUP_FAILED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "smr",
    version,
    about = "Run command stacks through the Siebel server manager console"
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a task against the console
    Run(run::RunArgs),
    /// Show the resolved command stack without opening a console
    Plan(plan::PlanArgs),
    /// Parse captured console output into records
    Parse(parse::ParseArgs),
    /// Evaluate failure conditions against captured output
    Check(check::CheckArgs),
    /// Remap file paths by prefix
    MapPaths(map_paths::MapPathsArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

async fn dispatch(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Run(args) => run::run(args).await,
        Commands::Plan(args) => plan::plan(args).map(|()| ExitCode::SUCCESS),
        Commands::Parse(args) => parse::parse(args).map(|()| ExitCode::SUCCESS),
        Commands::Check(args) => check::check(args),
        Commands::MapPaths(args) => map_paths::map_paths(args).map(|()| ExitCode::SUCCESS),
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::setup_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(SETUP_FAILED);
        }
    };

    match dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<SmrError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::from(SETUP_FAILED)
        }
    }
}
