// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vendor shell profile sourcing

use crate::console::ConsoleError;
use smr_core::env::{parse_set_output, PROFILE_SCRIPT};
use std::path::Path;
use tokio::process::Command;

/// Source `<sieb_path>/siebenv.sh` in a POSIX shell and capture the
/// resulting variables
pub async fn source_profile(sieb_path: &Path) -> Result<Vec<(String, String)>, ConsoleError> {
    let script = sieb_path.join(PROFILE_SCRIPT);
    let output = Command::new("sh")
        .arg("-c")
        .arg(". \"$1\"; set")
        .arg("sh")
        .arg(&script)
        .current_dir(sieb_path)
        .output()
        .await
        .map_err(|e| ConsoleError::Profile(format!("{}: {}", script.display(), e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConsoleError::Profile(format!(
            "{}: {}",
            script.display(),
            stderr.trim()
        )));
    }

    let vars = parse_set_output(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!(count = vars.len(), "sourced server profile");
    Ok(vars)
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
