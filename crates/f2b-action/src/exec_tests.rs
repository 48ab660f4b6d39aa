// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

#[test]
fn successful_command_returns_true() {
    assert!(run_shell("exit 0", &[], DEFAULT_TIMEOUT).unwrap());
}

#[test]
fn failing_command_returns_false() {
    assert!(!run_shell("exit 1", &[], DEFAULT_TIMEOUT).unwrap());
}

#[test]
fn env_is_visible_to_child_only() {
    let env = vec![("FAIL2BAN_IP".to_string(), "10.0.0.1".to_string())];
    let ok = run_shell(
        r#"test "$FAIL2BAN_IP" = "10.0.0.1""#,
        &env,
        DEFAULT_TIMEOUT,
    )
    .unwrap();
    assert!(ok);
    assert!(std::env::var("FAIL2BAN_IP").is_err());
}

#[test]
fn timeout_kills_long_running_command() {
    let result = run_shell("sleep 30", &[], Duration::from_millis(100));
    assert!(matches!(result, Err(MitigationError::Timeout { .. })));
}
