// SPDX-License-Identifier: GPL-2.0-or-later

//! Serialized, timed shell execution.
//!
//! All command executions acquire [`CMD_LOCK`], a process-wide mutex,
//! before invoking the shell and release it only after the child exits
//! — this prevents two jails from mutating firewall state concurrently
//! with inconsistent intermediate views. A bounded wall-clock timeout
//! (default 60s) sends `SIGTERM` first and escalates to `SIGKILL` after
//! a 5s grace period if the child hasn't exited.

use crate::error::MitigationError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Process-wide command-execution mutex: every jail and action shares
/// this one lock, so firewall-mutating commands never interleave.
static CMD_LOCK: Mutex<()> = Mutex::new(());

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const KILL_GRACE_PERIOD: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs `cmd` through `sh -c`, with `env` exported in the child's
/// environment only (the parent process's own environment is never
/// touched, so there is nothing to unset on exit). Returns `Ok(true)`
/// if the command exited with status 0, `Ok(false)` on any other exit
/// status, and `Err` if the command failed to spawn or had to be
/// killed after `timeout`.
///
/// Execution is serialized process-wide via [`CMD_LOCK`]: the lock is
/// held for the full spawn-to-exit duration, so only one command runs
/// at a time across every jail and action in the daemon.
pub fn run_shell(
    cmd: &str,
    env: &[(String, String)],
    timeout: Duration,
) -> Result<bool, MitigationError> {
    let _guard = CMD_LOCK.lock();
    tracing::debug!(cmd, "executing mitigation command");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .spawn()
        .map_err(|source| MitigationError::Spawn {
            command: cmd.to_string(),
            source,
        })?;

    match wait_with_timeout(&mut child, timeout) {
        Some(status) => {
            if status.success() {
                tracing::debug!(cmd, "command returned successfully");
                Ok(true)
            } else {
                tracing::error!(cmd, code = ?status.code(), "command returned nonzero");
                Ok(false)
            }
        }
        None => {
            tracing::error!(cmd, timeout_secs = timeout.as_secs(), "command timed out, killing");
            kill_with_escalation(&mut child);
            Err(MitigationError::Timeout {
                command: cmd.to_string(),
                timeout_secs: timeout.as_secs(),
            })
        }
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
    let start = Instant::now();
    loop {
        if let Ok(Some(status)) = child.try_wait() {
            return Some(status);
        }
        if start.elapsed() >= timeout {
            return None;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// `SIGTERM`, then `SIGKILL` after a grace period if the child is still
/// alive. Best-effort: errors sending a signal to an already-reaped
/// child are ignored.
fn kill_with_escalation(child: &mut Child) {
    let pid = Pid::from_raw(child.id() as i32);
    let _ = signal::kill(pid, Signal::SIGTERM);
    if wait_with_timeout(child, KILL_GRACE_PERIOD).is_some() {
        return;
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
