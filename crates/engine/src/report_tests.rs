// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn clean_command_reports_ok() {
    let result = CommandResult::new("list servers", "SBLSRVR_NAME\n", "", "");
    assert_eq!(status_line(&result), "Srvrmgr task: \"list servers\" -> Ok");
}

#[test]
fn failed_command_reports_fail() {
    let result = CommandResult::new("read /tmp/x/start.cmd", "", "SBL-ADM-60070", "");
    assert_eq!(status_line(&result), "Srvrmgr task: \"start.cmd\" -> Fail");
}

#[test]
fn warned_command_lists_lines_after_the_echo() {
    let result = CommandResult::new(
        "create comp grp X",
        "",
        "",
        "create comp grp X\nSBL-ADM-01067: already exists\nSBL-ADM-01049: ignored\n",
    );
    assert_eq!(
        status_line(&result),
        "Srvrmgr task: \"create comp grp X\" -> Skipped with errors:\n - SBL-ADM-01067: already exists\n - SBL-ADM-01049: ignored"
    );
}

#[test]
fn recording_reporter_keeps_order() {
    let reporter = RecordingReporter::new();
    reporter.plan_ready(2);
    reporter.command_finished(&CommandResult::new("a", "", "", ""));
    reporter.command_finished(&CommandResult::new("b", "", "oops", ""));

    assert_eq!(reporter.events()[0], ReportEvent::PlanReady(2));
    assert_eq!(
        reporter.lines(),
        vec![
            "Srvrmgr task: \"a\" -> Ok".to_string(),
            "Srvrmgr task: \"b\" -> Fail".to_string(),
        ]
    );
}
