// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner factory for CLI commands

use crate::reporter::TerminalReporter;
use async_trait::async_trait;
use smr_adapters::{
    DirStager, InPlaceStager, SrvrmgrLauncher, StageError, Stager, TracedConsoleLauncher,
    TracedStager,
};
use smr_core::{PriorityKey, TaskParams};
use smr_engine::{Runner, RunnerDeps};
use std::path::Path;

/// Production runner type
pub type CliRunner =
    Runner<TracedConsoleLauncher<SrvrmgrLauncher>, TracedStager<ParamStager>, TerminalReporter>;

/// Stager chosen by `staging_dir`
#[derive(Clone)]
pub enum ParamStager {
    InPlace(InPlaceStager),
    Dir(DirStager),
}

impl ParamStager {
    pub fn for_params(params: &TaskParams) -> Self {
        match &params.staging_dir {
            Some(dir) => ParamStager::Dir(DirStager::new(dir.clone())),
            None => ParamStager::InPlace(InPlaceStager::new()),
        }
    }
}

#[async_trait]
impl Stager for ParamStager {
    async fn stage(&self, key: &PriorityKey, local: &Path) -> Result<String, StageError> {
        match self {
            ParamStager::InPlace(stager) => stager.stage(key, local).await,
            ParamStager::Dir(stager) => stager.stage(key, local).await,
        }
    }
}

/// Create a production runner for the given parameters
pub fn make_runner(params: &TaskParams, reporter: TerminalReporter) -> CliRunner {
    Runner::new(RunnerDeps {
        launcher: TracedConsoleLauncher::new(SrvrmgrLauncher::new()),
        stager: TracedStager::new(ParamStager::for_params(params)),
        reporter,
    })
}
