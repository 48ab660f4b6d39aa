// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

fn a_info(pairs: &[(&str, &str)]) -> TagMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn ban_with_passing_check_runs_once() {
    let mut action = Action::new("iptables");
    action.set_command(Slot::Check, "true");
    action.set_command(Slot::Ban, "exit 0");
    let ok = action.exec_ban(&a_info(&[("ip", "10.0.0.1")])).unwrap();
    assert!(ok);
}

#[test]
fn s6_check_restore_sequence_runs_ban_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let check_calls = dir.path().join("check_calls");
    let ban_calls = dir.path().join("ban_calls");
    std::fs::write(&check_calls, "").unwrap();
    std::fs::write(&ban_calls, "").unwrap();

    let mut action = Action::new("flaky");
    // check fails on the first invocation (file empty), succeeds
    // once `start` has run (file non-empty after start writes to it).
    action.set_command(
        Slot::Check,
        format!("test -s {}", check_calls.display()),
    );
    action.set_command(Slot::Start, format!("echo started >> {}", check_calls.display()));
    action.set_command(Slot::Stop, "true");
    action.set_command(Slot::Ban, format!("echo banned >> {}", ban_calls.display()));

    let ok = action.exec_ban(&a_info(&[("ip", "10.0.0.1")])).unwrap();
    assert!(ok);
    let ban_log = std::fs::read_to_string(&ban_calls).unwrap();
    assert_eq!(ban_log.lines().count(), 1);
}

#[test]
fn restore_failure_is_reported() {
    let mut action = Action::new("broken");
    action.set_command(Slot::Check, "exit 1");
    action.set_command(Slot::Stop, "true");
    action.set_command(Slot::Start, "true");
    action.set_command(Slot::Ban, "exit 0");
    let err = action.exec_ban(&TagMap::new()).unwrap_err();
    assert!(matches!(err, MitigationError::RestoreFailed { .. }));
}

#[test]
fn empty_command_is_a_noop_success() {
    let action = Action::new("noop");
    assert!(action.exec_start().unwrap());
}

#[test]
fn pass_environ_exports_tags_to_child() {
    let mut action = Action::new("env-action");
    action.set_pass_environ(true);
    action.set_c_info("port", "22");
    action.set_command(Slot::Check, "true");
    action.set_command(
        Slot::Ban,
        r#"test "$FAIL2BAN_port" = "22" && test "$FAIL2BAN_ip" = "10.0.0.1""#,
    );
    let ok = action.exec_ban(&a_info(&[("ip", "10.0.0.1")])).unwrap();
    assert!(ok);
}
