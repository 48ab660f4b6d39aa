// SPDX-License-Identifier: GPL-2.0-or-later

//! Sliding-window counter over recent failures keyed by origin.

use crate::error::FailManagerEmpty;
use f2b_core::{FailTicket, Family};
use std::collections::HashMap;

type Key = (String, Family, u8);

/// Aggregates [`FailTicket`]s by `(ip, family, prefix)` over a rolling
/// `maxTime`-second window, and decides when an origin has crossed
/// `maxRetry`.
pub struct FailManager {
    entries: HashMap<Key, FailTicket>,
    max_retry: u32,
    max_time: i64,
    /// Monotonic counter of every failure ever ingested, never
    /// decremented — `getFailTotal()`.
    total: u64,
}

impl Default for FailManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FailManager {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            max_retry: 3,
            max_time: 600,
            total: 0,
        }
    }

    pub fn set_max_retry(&mut self, value: u32) {
        self.max_retry = value;
    }

    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    pub fn set_max_time(&mut self, value: i64) {
        self.max_time = value;
    }

    pub fn max_time(&self) -> i64 {
        self.max_time
    }

    /// `addFailure`: look up by key. Absent → insert at `attempts = 1`.
    /// Present and within `maxTime` of the earliest retained failure →
    /// merge (attempts += 1, extend latest, append match, bounded).
    /// Present but outside the window → replace (the window restarts).
    pub fn add_failure(&mut self, ticket: FailTicket) {
        self.total += 1;
        let key = ticket.key();
        match self.entries.get_mut(&key) {
            Some(existing) if ticket.time - existing.earliest <= self.max_time => {
                existing.attempts += 1;
                existing.latest = existing.latest.max(ticket.time);
                for m in ticket.matches {
                    existing.push_match(m);
                }
            }
            _ => {
                self.entries.insert(key, ticket);
            }
        }
    }

    /// `toBan`: removes and returns one entry whose `attempts >=
    /// maxRetry`, preferring the earliest `latest` (i.e. the origin that
    /// crossed the threshold longest ago) — this is the order in which
    /// ban tickets are handed to the jail. When `prefix` is given, only
    /// entries at that prefix are eligible.
    pub fn to_ban(&mut self, prefix: Option<u8>) -> Result<FailTicket, FailManagerEmpty> {
        let key = self
            .entries
            .iter()
            .filter(|(k, v)| {
                v.attempts >= self.max_retry && prefix.map(|p| k.2 == p).unwrap_or(true)
            })
            .min_by_key(|(_, v)| v.latest)
            .map(|(k, _)| k.clone());
        match key {
            Some(key) => self.entries.remove(&key).ok_or(FailManagerEmpty),
            None => Err(FailManagerEmpty),
        }
    }

    /// `cleanup`: drops entries whose `latest` has fallen out of the
    /// window relative to `now`.
    pub fn cleanup(&mut self, now: i64) {
        self.entries.retain(|_, v| v.latest >= now - self.max_time);
    }

    /// `size`: count of currently tracked entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// `getFailTotal`: monotonic counter of all failures ever ingested.
    pub fn get_fail_total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
#[path = "fail_manager_tests.rs"]
mod tests;
