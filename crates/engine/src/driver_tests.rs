// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use smr_adapters::{ConsoleLauncher, ConsoleSpec, FakeConsole, FakeConsoleLauncher, FakeReply};
use std::path::PathBuf;

const PASSWORD: &str = "Sup3rS3cret";

fn fast_timeouts() -> Timeouts {
    Timeouts {
        output: Duration::from_millis(200),
        quiet: Duration::from_millis(20),
        exit: Duration::from_millis(200),
    }
}

fn spec() -> ConsoleSpec {
    ConsoleSpec {
        program: "srvrmgr".to_string(),
        gateway: "gw".to_string(),
        enterprise: "ent".to_string(),
        admin_user: "sadmin".to_string(),
        sieb_path: PathBuf::from("/siebel/ses"),
        env_overrides: Vec::new(),
    }
}

async fn driver(
    launcher: &FakeConsoleLauncher,
    skip_errors: &[&str],
) -> ConsoleDriver<FakeConsole> {
    let console = launcher.open(&spec()).await.unwrap();
    ConsoleDriver::new(
        console,
        PASSWORD,
        skip_errors.iter().map(|s| s.to_string()).collect(),
        fast_timeouts(),
        CancellationToken::new(),
    )
}

#[tokio::test]
async fn exec_strips_prompt_echo() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on("list servers", FakeReply::out("SBLSRVR_NAME\n-----\nsrv1\n"));
    let mut driver = driver(&launcher, &[]).await;

    let output = driver.exec("list servers").await.unwrap();

    assert_eq!(output.out, "SBLSRVR_NAME\n-----\nsrv1\n");
    assert!(output.err.is_empty());
    assert!(!output.is_failure());
}

#[tokio::test]
async fn exec_joins_chunked_output() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on(
        "list comps",
        FakeReply::chunks(["SV_NAME^$^CC_ALIAS\n", "-------\n", "srv1^$^EIM\n"]),
    );
    let mut driver = driver(&launcher, &[]).await;

    let output = driver.exec("list comps").await.unwrap();

    assert_eq!(output.out, "SV_NAME^$^CC_ALIAS\n-------\nsrv1^$^EIM\n");
}

#[tokio::test]
async fn exec_masks_the_admin_password_on_both_streams() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on(
        PASSWORD,
        FakeReply::out(format!("Password: {}\nConnected", PASSWORD))
            .with_err(format!("echo {}", PASSWORD)),
    );
    let mut driver = driver(&launcher, &[]).await;

    let output = driver.exec(PASSWORD).await.unwrap();

    assert_eq!(output.out, "Password: ******\nConnected");
    assert_eq!(output.err, "echo ******");
}

#[tokio::test]
async fn skip_listed_error_becomes_warning() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on(
        "create comp grp X",
        FakeReply::default().with_err("SBL-ADM-01067: already exists"),
    );
    let mut driver = driver(&launcher, &["SBL-ADM-01067"]).await;

    let output = driver.exec("create comp grp X").await.unwrap();

    assert!(output.err.is_empty());
    assert_eq!(output.warn, "SBL-ADM-01067: already exists");
    assert!(!output.is_failure());
}

#[tokio::test]
async fn unlisted_error_is_a_failure() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on(
        "start task for comp X",
        FakeReply::default().with_err("SBL-ADM-60070: no such component"),
    );
    let mut driver = driver(&launcher, &["SBL-ADM-01067"]).await;

    let output = driver.exec("start task for comp X").await.unwrap();

    assert_eq!(output.err, "SBL-ADM-60070: no such component");
    assert!(output.warn.is_empty());
    assert!(output.is_failure());
}

#[tokio::test]
async fn silent_console_times_out() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on("hang", FakeReply::silent());
    let mut driver = driver(&launcher, &[]).await;

    let err = driver.exec("hang").await.unwrap_err();

    assert!(matches!(
        err,
        ConsoleError::OutputTimeout {
            stream: Stream::Stdout,
            ..
        }
    ));
}

#[tokio::test]
async fn cancellation_interrupts_the_wait() {
    let launcher = FakeConsoleLauncher::new();
    launcher.on("hang", FakeReply::silent());
    let console = launcher.open(&spec()).await.unwrap();
    let cancel = CancellationToken::new();
    let mut driver = ConsoleDriver::new(
        console,
        PASSWORD,
        Vec::new(),
        Timeouts {
            output: Duration::from_secs(60),
            ..fast_timeouts()
        },
        cancel.clone(),
    );
    cancel.cancel();

    let err = driver.exec("hang").await.unwrap_err();

    assert!(matches!(err, ConsoleError::Cancelled));
}

#[tokio::test]
async fn quit_returns_empty_output() {
    let launcher = FakeConsoleLauncher::new();
    let mut driver = driver(&launcher, &[]).await;

    let output = driver.exec("quit").await.unwrap();

    assert_eq!(output, RawOutput::default());
    assert!(driver.close().await.unwrap().success());
}

#[tokio::test]
async fn hanging_console_fails_to_close() {
    let launcher = FakeConsoleLauncher::new();
    launcher.hang_on_close();
    let mut driver = driver(&launcher, &[]).await;

    let err = driver.close().await.unwrap_err();

    assert!(matches!(err, ConsoleError::ExitTimeout(_)));
}

#[tokio::test]
async fn abnormal_exit_is_an_error() {
    let launcher = FakeConsoleLauncher::new();
    launcher.set_exit_code(2);
    let mut driver = driver(&launcher, &[]).await;

    let err = driver.close().await.unwrap_err();

    assert!(matches!(err, ConsoleError::ExitFailed(Some(2))));
}

#[test]
fn empty_skip_entries_never_match() {
    let output = RawOutput::classify(
        String::new(),
        "SBL-ADM-02071: bad".to_string(),
        &[String::new()],
    );
    assert!(output.is_failure());
}
