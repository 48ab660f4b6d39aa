// SPDX-License-Identifier: GPL-2.0-or-later

use thiserror::Error;

/// Errors shared across the core crates that don't have a more specific
/// home (see `f2b_filter::FilterError`, `f2b_watch::WatchError`,
/// `f2b_action::ActionError` for the rest of the taxonomy).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Config(String),
}
