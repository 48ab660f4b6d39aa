// SPDX-License-Identifier: GPL-2.0-or-later

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Jail glue: config loading, one worker thread per
//! monitored log path, and the ban/unban dispatcher that ties the filter
//! pipeline to the action engine.

pub mod config;
pub mod error;
pub mod jail;
mod worker;

pub use config::{ActionConfig, DaemonConfig, JailConfig};
pub use error::DaemonError;
pub use jail::Jail;
