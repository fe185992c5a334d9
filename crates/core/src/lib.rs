// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! smr-core: pure logic for driving the server manager console
//!
//! This crate provides:
//! - Secret redaction for everything shown to the operator
//! - Command-stack resolution into an ordered, keyed plan
//! - Parsing of console output into records
//! - Task parameters, console environment, output checks and path mapping

pub mod checks;
pub mod env;
pub mod params;
pub mod parser;
pub mod path_map;
pub mod redact;
pub mod result;
pub mod stack;

pub use checks::{
    fails_in_outs, has_fails, missing_paths, path_exists, Condition, OutConditions, Outs,
};
pub use params::{AddEnv, ParamsError, TaskParams, Timeouts, MARKER};
pub use parser::{parse, Record};
pub use path_map::{map_paths, MapTarget, PathMapError, PathMapping};
pub use redact::{mask_password, Credentials};
pub use result::{display_command, CommandResult, CommandStatus, OutputBlock};
pub use stack::{
    resolve, CommandEntry, PlanEntry, PriorityKey, ResolvedStack, Resolver, ScriptSkip, StackError,
};
