// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console process environment
//!
//! The vendor profile (`siebenv.sh`) is sourced by a shell and its variables
//! are merged over the caller's environment. Shell-internal variables of the
//! sourcing shell are not carried over.

use std::collections::BTreeMap;

/// Name of the vendor profile inside the server installation directory
pub const PROFILE_SCRIPT: &str = "siebenv.sh";

/// Variables the console always runs with
pub const FORCED_ENV: [(&str, &str); 2] = [
    ("NLS_LANG", "AMERICAN_AMERICA.AL32UTF8"),
    ("SIEBEL_DEBUG_FLAGS", "16"),
];

/// Shell-internal variables never copied from the sourced profile
pub const DENIED_VARS: &[&str] = &[
    "_", "EDITOR", "ENV", "FCEDIT", "HISTCMD", "HOME", "IFS", "JOBMAX", "KSH_VERSION", "LINENO",
    "LOGNAME", "MAIL", "MAILCHECK", "OLDPWD", "OPTIND", "PPID", "PWD", "RANDOM", "SECONDS",
    "SHELL", "SHLVL", "TERM", "TMOUT", "TZ", "USER",
];

/// Whether a profile variable is left out of the console environment
pub fn is_denied(name: &str) -> bool {
    DENIED_VARS.contains(&name) || name.starts_with("SSH_") || has_prompt_var(name)
}

// PS1, PS2, ... anywhere in the name
fn has_prompt_var(name: &str) -> bool {
    name.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'P' && w[1] == b'S' && w[2].is_ascii_digit())
}

/// Parse the output of a shell's `set` builtin into name/value pairs
pub fn parse_set_output(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(name, _)| !name.is_empty() && !name.contains(char::is_whitespace))
        .map(|(name, value)| (name.to_string(), unquote(value).to_string()))
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

/// Build the console environment
///
/// Layering, last wins: `base`, forced variables, allowed profile
/// variables, then `overrides`.
pub fn prepare_env<I>(
    base: I,
    profile: &[(String, String)],
    overrides: &[(String, String)],
) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env: BTreeMap<String, String> = base.into_iter().collect();
    for (name, value) in FORCED_ENV {
        env.insert(name.to_string(), value.to_string());
    }
    for (name, value) in profile {
        if is_denied(name) {
            tracing::trace!(name, "skipping shell variable from profile");
            continue;
        }
        env.insert(name.clone(), value.clone());
    }
    for (name, value) in overrides {
        env.insert(name.clone(), value.clone());
    }
    env
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
