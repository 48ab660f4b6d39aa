// SPDX-License-Identifier: GPL-2.0-or-later

use thiserror::Error;

/// Nonzero exit (or timeout) from an action command. Triggers the
/// check/restore sequence; if restore also fails this is logged
/// as fatal and the triggering ticket is dropped — it is not retried
/// indefinitely.
#[derive(Debug, Error)]
pub enum MitigationError {
    #[error("command {command:?} failed to spawn: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command {command:?} did not exit within {timeout_secs}s and was killed")]
    Timeout { command: String, timeout_secs: u64 },
    #[error("invariant check failed and could not be restored for action {action:?}")]
    RestoreFailed { action: String },
}
