// SPDX-License-Identifier: GPL-2.0-or-later

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Mitigation action engine: tag substitution, the check/restore
//! invariant, and serialized, timed shell command execution.

pub mod action;
pub mod error;
pub mod exec;
pub mod tags;

pub use action::{Action, Commands, Slot};
pub use error::MitigationError;
pub use tags::TagMap;
