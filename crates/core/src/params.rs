// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task parameters
//!
//! One parameter file describes one console run: the command stack, the
//! secrets to hide, and how to reach the enterprise.

use crate::redact::Credentials;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Field separator the console emits between columns when started with `-k`
pub const MARKER: &str = "^$^";

/// Default console login
pub const DEFAULT_ADMIN_USER: &str = "sadmin";

/// Default console binary, resolved through PATH
pub const DEFAULT_SRVRMGR_BIN: &str = "srvrmgr";

/// Errors in task parameters, reported before anything runs
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("cannot read parameter file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid parameters:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Deserialize `null` as the type's default (the host passes nulls for unset lists)
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A scalar environment value; numbers and booleans are stringified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for EnvValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvValue::Text(s) => f.write_str(s),
            EnvValue::Integer(n) => write!(f, "{}", n),
            EnvValue::Float(n) => write!(f, "{}", n),
            EnvValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Extra environment for the console process
///
/// Accepts a mapping or the inline form `"KEY=VALUE; KEY2=VALUE2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddEnv {
    Map(BTreeMap<String, EnvValue>),
    Inline(String),
}

impl AddEnv {
    /// Flatten into ordered key/value pairs
    pub fn pairs(&self) -> Result<Vec<(String, String)>, String> {
        match self {
            AddEnv::Map(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v.to_string())).collect()),
            AddEnv::Inline(text) => text
                .split(';')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let (key, value) = part
                        .split_once('=')
                        .ok_or_else(|| format!("add_env entry without '=': {}", part))?;
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(format!("add_env entry with empty name: {}", part));
                    }
                    Ok((key.to_string(), value.trim().to_string()))
                })
                .collect(),
        }
    }
}

/// Waiting policy for console I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// How long to wait for the first byte of output after a command
    #[serde(with = "humantime_serde", default = "default_output")]
    pub output: Duration,
    /// A stream counts as drained after this long without new bytes
    #[serde(with = "humantime_serde", default = "default_quiet")]
    pub quiet: Duration,
    /// How long to wait for the console to exit once input is closed
    #[serde(with = "humantime_serde", default = "default_exit")]
    pub exit: Duration,
}

fn default_output() -> Duration {
    Duration::from_secs(300)
}

fn default_quiet() -> Duration {
    Duration::from_secs(1)
}

fn default_exit() -> Duration {
    Duration::from_secs(60)
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            output: default_output(),
            quiet: default_quiet(),
            exit: default_exit(),
        }
    }
}

fn default_admin_user() -> String {
    DEFAULT_ADMIN_USER.to_string()
}

fn default_srvrmgr_bin() -> String {
    DEFAULT_SRVRMGR_BIN.to_string()
}

/// Parameters of one console run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskParams {
    /// Literal commands, script files and script directories, in order
    pub cmd_stack: Vec<String>,
    pub creds: Credentials,
    /// Error substrings that downgrade a console error to a warning
    #[serde(default, deserialize_with = "null_as_default")]
    pub skip_errors: Vec<String>,
    /// Only scripts whose content matches this pattern are run
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub add_env: Option<AddEnv>,
    /// Server installation directory holding `siebenv.sh`
    pub sieb_path: PathBuf,
    pub sieb_gateway: String,
    pub sieb_enterprise: String,
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
    #[serde(default = "default_srvrmgr_bin")]
    pub srvrmgr_bin: String,
    /// Where scripts are copied before the console reads them
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeouts: Timeouts,
}

impl TaskParams {
    /// Load parameters from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|e| e == "toml") {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ParamsError> {
        Ok(toml::from_str(content)?)
    }

    /// Check everything that can be checked without touching the console
    ///
    /// Reports all problems together.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let mut problems = Vec::new();

        if self.creds.sadmin_pw.is_empty() {
            problems.push("creds.sadmin_pw must not be empty".to_string());
        }
        for (name, value) in [
            ("sieb_gateway", &self.sieb_gateway),
            ("sieb_enterprise", &self.sieb_enterprise),
            ("admin_user", &self.admin_user),
            ("srvrmgr_bin", &self.srvrmgr_bin),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{} must not be empty", name));
            }
        }
        if self.sieb_path.as_os_str().is_empty() {
            problems.push("sieb_path must not be empty".to_string());
        }
        if let Err(e) = self.filter_regex() {
            problems.push(e);
        }
        if let Some(add_env) = &self.add_env {
            if let Err(e) = add_env.pairs() {
                problems.push(e);
            }
        }
        for (name, value) in [
            ("timeouts.output", self.timeouts.output),
            ("timeouts.quiet", self.timeouts.quiet),
            ("timeouts.exit", self.timeouts.exit),
        ] {
            if value.is_zero() {
                problems.push(format!("{} must be greater than zero", name));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ParamsError::Invalid(problems))
        }
    }

    /// Compiled script filter, if one was given
    pub fn filter_regex(&self) -> Result<Option<Regex>, String> {
        self.filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| format!("filter is not a valid regex: {}", e))
            })
            .transpose()
    }

    /// `add_env` as pairs; invalid entries were rejected by [`TaskParams::validate`]
    pub fn env_overrides(&self) -> Vec<(String, String)> {
        self.add_env
            .as_ref()
            .and_then(|e| e.pairs().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
