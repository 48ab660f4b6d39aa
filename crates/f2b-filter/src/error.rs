// SPDX-License-Identifier: GPL-2.0-or-later

use thiserror::Error;

/// Malformed regex, missing `<HOST>` group, or a bad `usedns` value.
/// Surfaced to the setter's caller; filter state is left unchanged.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid regular expression {pattern:?}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("fail regex {0:?} has no named group <HOST>")]
    MissingHostGroup(String),
    #[error("invalid index {0}")]
    InvalidIndex(usize),
    #[error("invalid usedns value: {0}")]
    InvalidUseDns(String),
}

/// Internal control-flow signal from `FailManager::to_ban`: no entry has
/// crossed the retry threshold yet. Not logged as an error.
#[derive(Debug, Error)]
#[error("no entry has reached maxRetry")]
pub struct FailManagerEmpty;
