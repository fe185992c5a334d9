// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for `smr run` against a fake console

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use common::{TaskEnv, PASSWORD};
use predicates::prelude::*;
use serde_json::Value;

fn run(params: &std::path::Path) -> assert_cmd::assert::Assert {
    Command::cargo_bin("smr")
        .unwrap()
        .args(["run", &params.display().to_string()])
        .assert()
}

fn outcome(assert: &assert_cmd::assert::Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

#[test]
fn successful_run_prints_parsed_results() {
    let env = TaskEnv::new();
    let params = env.params(&["list servers"]);

    let assert = run(&params)
        .success()
        .stderr(predicate::str::contains("Execute tasks [2]..."))
        .stderr(predicate::str::contains(
            "Srvrmgr task: \"list servers\" -> Ok",
        ));
    let outcome = outcome(&assert);

    assert_eq!(outcome["changed"], true);
    assert_eq!(outcome["failed"], false);
    let results = outcome["results"].as_array().unwrap();
    let cmds: Vec<&str> = results.iter().map(|r| r["cmd"].as_str().unwrap()).collect();
    assert_eq!(cmds, vec!["Authorization", "list servers", "quit"]);
    similar_asserts::assert_eq!(
        results[0]["out"]["parsed"],
        serde_json::json!([{ "available_servers": "1", "total_servers": "2" }])
    );
    similar_asserts::assert_eq!(
        results[1]["out"]["parsed"],
        serde_json::json!([{ "SV_NAME": "siebsrv1", "HOST_NAME": "host1", "SBLSRVR_STATE": "Running" }])
    );
}

#[test]
fn failing_command_exits_one_with_stderr() {
    let env = TaskEnv::new();
    let params = env.params(&["bad comp", "list servers"]);

    let assert = run(&params)
        .code(1)
        .stderr(predicate::str::contains("Srvrmgr task: \"bad comp\" -> Fail"))
        .stderr(predicate::str::contains("Error on execute: bad comp"));
    let outcome = outcome(&assert);

    assert_eq!(outcome["failed"], true);
    assert_eq!(outcome["changed"], false);
    assert_eq!(outcome["results"].as_array().unwrap().len(), 2);
    assert!(outcome["stderr"]
        .as_str()
        .unwrap()
        .starts_with("SBL-ADM-60070"));
}

#[test]
fn skip_listed_error_keeps_going() {
    let env = TaskEnv::new();
    let params = env.params_with(serde_json::json!({
        "cmd_stack": ["bad comp", "list servers"],
        "skip_errors": ["SBL-ADM-60070"],
    }));

    let assert = run(&params)
        .success()
        .stderr(predicate::str::contains("-> Skipped with errors:"));
    let outcome = outcome(&assert);

    assert_eq!(outcome["results"][1]["warn"]["lines"][0], "SBL-ADM-60070: Error reading component (bad comp)");
    assert_eq!(outcome["results"].as_array().unwrap().len(), 4);
}

#[test]
fn secrets_are_masked_in_output() {
    let env = TaskEnv::new();
    let params = env.params_with(serde_json::json!({
        "cmd_stack": ["bad change param Password=db-pass-42"],
        "creds": { "sadmin_pw": PASSWORD, "other": ["db-pass-42"] },
    }));

    let assert = run(&params).code(1);
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();

    for text in [&stdout, &stderr] {
        assert!(!text.contains(PASSWORD), "{text}");
        assert!(!text.contains("db-pass-42"), "{text}");
    }
    assert!(stdout.contains("Password=******"), "{stdout}");
}

#[test]
fn scripts_from_a_directory_run_in_name_order() {
    let env = TaskEnv::new();
    let scripts = env.path().join("scripts");
    env.file("scripts/b.cmd", "list servers\n");
    env.file("scripts/a.cmd", "list comps\n");
    let params = env.params(&[scripts.to_str().unwrap()]);

    let assert = run(&params).success();
    let outcome = outcome(&assert);

    let cmds: Vec<String> = outcome["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["cmd"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(cmds, vec!["Authorization", "a.cmd", "b.cmd", "quit"]);
}

#[test]
fn invalid_parameters_exit_two_with_every_problem() {
    let env = TaskEnv::new();
    let params = env.params_with(serde_json::json!({
        "creds": { "sadmin_pw": "" },
        "sieb_gateway": "",
    }));

    run(&params)
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: Invalid task parameters"))
        .stderr(predicate::str::contains("sadmin_pw"))
        .stderr(predicate::str::contains("sieb_gateway"))
        .stderr(predicate::str::contains("suggestions:"));
}

#[test]
fn missing_console_binary_exits_two() {
    let env = TaskEnv::new();
    let params = env.params_with(serde_json::json!({
        "cmd_stack": ["list servers"],
        "srvrmgr_bin": env.path().join("no-such-srvrmgr"),
    }));

    run(&params)
        .code(2)
        .stderr(predicate::str::contains("srvrmgr_bin"));
}

#[test]
fn missing_params_file_exits_two() {
    let env = TaskEnv::new();

    run(&env.path().join("absent.json"))
        .code(2)
        .stderr(predicate::str::contains("absent.json"));
}
