// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::parse;
use yare::parameterized;

#[parameterized(
    in_match = { "in", "SBL-", "SBL-ADM-60070", true },
    in_miss = { "in", "SBL-", "all good", false },
    not_in = { "not in", "completed", "error", true },
    greater_numeric = { ">", "9", "10", true },
    less_numeric = { "<", "9", "10", false },
    greater_text = { ">", "a", "b", true },
    equal = { "==", "ok", "ok", true },
    not_equal = { "!=", "ok", "ok", false },
    not_empty = { "not empty", "", "x", true },
    not_empty_on_empty = { "not empty", "", "", false },
    regex = { "regex", r"SBL-\w+-\d+", "got SBL-ADM-60070", true },
    unknown = { "sometimes", "", "x", true },
)]
fn condition_kinds(cond: &str, data: &str, target: &str, expected: bool) {
    assert_eq!(Condition::new(cond, data).holds(target), expected);
}

#[test]
fn has_fails_stops_at_first_hit() {
    let conds = vec![Condition::new("in", "nope"), Condition::new("in", "SBL")];
    assert!(has_fails("SBL-ADM-1", &conds));
    assert!(!has_fails("fine", &conds));
    assert!(!has_fails("anything", &[]));
}

#[test]
fn conditions_deserialize_from_playbook_shape() {
    let conds: OutConditions = serde_json::from_value(serde_json::json!({
        "STDOUT": [{"cond": "in", "data": "failed"}],
        "STDERR": [{"cond": "not empty"}]
    }))
    .unwrap();

    assert_eq!(conds.stdout.as_ref().unwrap()[0].cond, CondKind::In);
    assert_eq!(conds.stderr.as_ref().unwrap()[0].cond, CondKind::NotEmpty);
    assert!(conds.stderr.as_ref().unwrap()[0].data.is_none());
}

#[test]
fn fails_in_outs_checks_each_stream() {
    let conds = OutConditions {
        stdout: Some(vec![Condition::new("in", "failed")]),
        stderr: Some(vec![Condition::new("not empty", "")]),
    };

    let clean = Outs {
        stdout: "ok".to_string(),
        stderr: String::new(),
    };
    assert!(!fails_in_outs(&clean, &conds));

    let stderr_only = Outs {
        stdout: "ok".to_string(),
        stderr: "warning".to_string(),
    };
    assert!(fails_in_outs(&stderr_only, &conds));

    let stdout_only = Outs {
        stdout: "step failed".to_string(),
        stderr: String::new(),
    };
    assert!(fails_in_outs(&stdout_only, &conds));
}

#[test]
fn missing_or_empty_condition_lists_never_fail() {
    let outs = Outs {
        stdout: "x".to_string(),
        stderr: "y".to_string(),
    };
    assert!(!fails_in_outs(&outs, &OutConditions::default()));
    assert!(!fails_in_outs(
        &outs,
        &OutConditions {
            stdout: Some(Vec::new()),
            stderr: None,
        }
    ));
}

#[test]
fn active_components_keeps_online_and_running() {
    let records = parse(
        "CC_ALIAS^$^CP_DISP_RUN_STATE\n--^$^--\nEAIObjMgr^$^Online\nWfProcMgr^$^Running\nSRBroker^$^Shutdown\n\n3 rows returned.\n",
    );

    let active: Vec<&str> = active_components(&records)
        .iter()
        .map(|row| row["CC_ALIAS"].as_str())
        .collect();
    assert_eq!(active, vec!["EAIObjMgr", "WfProcMgr"]);
}

#[test]
fn path_exists_follows_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.cmd");
    std::fs::write(&file, "list comps\n").unwrap();

    assert!(path_exists(&file));
    assert!(path_exists(dir.path()));
    assert!(!path_exists(dir.path().join("gone.cmd")));
}

#[test]
fn dangling_symlink_does_not_exist() {
    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();

    assert!(!path_exists(&link));
}

#[test]
fn missing_paths_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present");
    std::fs::write(&present, "").unwrap();
    let paths = vec![
        dir.path().join("b"),
        present.clone(),
        dir.path().join("a"),
    ];

    assert_eq!(
        missing_paths(&paths),
        vec![dir.path().join("b").as_path(), dir.path().join("a").as_path()]
    );
}
