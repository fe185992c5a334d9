// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PASSWORD: &str = "Sup3rS3cret";

/// Console stand-in: login banner, one table command, `bad*` commands
/// fail on stderr, everything else only answers with the prompt.
const FAKE_SRVRMGR: &str = r#"#!/bin/sh
printf 'Password:'
read -r pw
printf '\n\nConnected to 1 server(s) out of a total of 2 server(s) in the enterprise\n\nsrvrmgr> '
while read -r line; do
  case "$line" in
    quit) exit 0 ;;
    "list servers")
      printf 'SV_NAME   ^$^HOST_NAME ^$^SBLSRVR_STATE\n'
      printf -- '----------^$^----------^$^-------------\n'
      printf 'siebsrv1  ^$^%s     ^$^Running\n' "$SIEBEL_HOST"
      printf '\n1 row returned.\n\nsrvrmgr> '
      ;;
    bad*)
      printf 'SBL-ADM-60070: Error reading component (%s)\n' "$line" >&2
      printf '\nsrvrmgr> '
      ;;
    *) printf '\nsrvrmgr> ' ;;
  esac
done
"#;

/// Installation directory with a profile and a fake console binary
pub struct TaskEnv {
    pub dir: TempDir,
}

impl TaskEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let program = dir.path().join("srvrmgr");
        fs::write(&program, FAKE_SRVRMGR).expect("Failed to write fake console");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake console executable");
        fs::write(
            dir.path().join("siebenv.sh"),
            "SIEBEL_HOST=host1\nexport SIEBEL_HOST\n",
        )
        .expect("Failed to write profile");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a JSON parameter file for `cmd_stack` and return its path
    pub fn params(&self, cmd_stack: &[&str]) -> PathBuf {
        self.params_with(serde_json::json!({ "cmd_stack": cmd_stack }))
    }

    /// Parameter file from `extra` merged over working defaults
    pub fn params_with(&self, extra: serde_json::Value) -> PathBuf {
        let mut params = serde_json::json!({
            "cmd_stack": [],
            "creds": { "sadmin_pw": PASSWORD },
            "skip_errors": [],
            "sieb_path": self.path(),
            "sieb_gateway": "gw01",
            "sieb_enterprise": "SBA_82",
            "srvrmgr_bin": self.path().join("srvrmgr"),
            "timeouts": { "output": "5s", "quiet": "100ms", "exit": "5s" }
        });
        if let (Some(base), Some(extra)) = (params.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        let path = self.path().join("task.json");
        fs::write(&path, params.to_string()).expect("Failed to write parameters");
        path
    }

    /// Write a file under the environment directory
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}
