// SPDX-License-Identifier: GPL-2.0-or-later

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Line-to-failure translation: regex wrappers, address/DNS handling,
//! the ignore list, timestamp extraction, and the sliding-window
//! FailManager.

pub mod address;
pub mod date_detector;
pub mod error;
pub mod fail_manager;
pub mod filter;
pub mod ignore;
pub mod regex_wrap;

pub use address::{Resolver, SystemResolver};
pub use date_detector::DateDetector;
pub use error::{ConfigError, FailManagerEmpty};
pub use fail_manager::FailManager;
pub use filter::{new_with_system_clock, FailElement, Filter};
pub use ignore::IgnoreList;
pub use regex_wrap::{FailRegex, Regex};
