// SPDX-License-Identifier: GPL-2.0-or-later

use crate::family::Family;
use crate::MAX_RETAINED_MATCHES;
use std::collections::VecDeque;

/// A single offence attributable to one origin, or the accumulated record
/// of several coalesced offences once it has passed through a FailManager.
///
/// Created with `attempts = 1` by `Filter::process_line_and_add`; grown
/// in place by `FailManager::add_failure` as further failures from the
/// same `(ip, family, prefix)` arrive inside the sliding window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailTicket {
    pub ip: String,
    pub family: Family,
    /// CIDR prefix length used when aggregating this origin. Always 32 for
    /// v4; the jail's configured `ipv6banprefix` (default 64) for v6.
    pub prefix: u8,
    /// Seconds since the Unix epoch of the triggering failure.
    pub time: i64,
    /// Earliest failure time folded into this ticket.
    pub earliest: i64,
    /// Latest failure time folded into this ticket.
    pub latest: i64,
    /// Count of coalesced failures. Always >= 1.
    pub attempts: u32,
    /// Raw log lines that contributed, newest-last, capped at
    /// `MAX_RETAINED_MATCHES`.
    pub matches: VecDeque<String>,
}

impl FailTicket {
    /// A freshly observed failure: `attempts = 1`, `earliest == latest == time`.
    pub fn new(ip: impl Into<String>, family: Family, time: i64) -> Self {
        Self {
            ip: ip.into(),
            family,
            prefix: family.default_prefix(),
            time,
            earliest: time,
            latest: time,
            attempts: 1,
            matches: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: u8) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_match(mut self, line: impl Into<String>) -> Self {
        self.push_match(line);
        self
    }

    /// Appends a contributing line, dropping the oldest once the cap is
    /// exceeded.
    pub fn push_match(&mut self, line: impl Into<String>) {
        if self.matches.len() >= MAX_RETAINED_MATCHES {
            self.matches.pop_front();
        }
        self.matches.push_back(line.into());
    }

    /// Key used to aggregate this ticket in a FailManager: the network
    /// portion of the address at `prefix`, plus family. Truncation to the
    /// network address is the caller's responsibility (see
    /// `f2b_filter::address::truncate_to_prefix`) — this is purely the
    /// tuple used for hashing once that's done.
    pub fn key(&self) -> (String, Family, u8) {
        (self.ip.clone(), self.family, self.prefix)
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
