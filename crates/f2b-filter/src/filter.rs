// SPDX-License-Identifier: GPL-2.0-or-later

//! Line-to-failure translation: ties together the regex
//! wrappers, the date detector, address/ignore handling, and the
//! FailManager into the `processLine` / `processLineAndAdd` pipeline.

use crate::address::{self, Resolver, SystemResolver};
use crate::date_detector::DateDetector;
use crate::error::{ConfigError, FailManagerEmpty};
use crate::fail_manager::FailManager;
use crate::ignore::IgnoreList;
use crate::regex_wrap::{FailRegex, Regex as PlainRegex};
use f2b_core::{Clock, FailTicket, Family, SystemClock, UseDns};
use std::sync::Arc;

/// One resolved `(ip, family, time)` triple extracted from a line, prior
/// to window/ignore filtering — the element of `find_failure`'s result
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailElement {
    pub ip: String,
    pub family: Family,
    pub time: i64,
}

/// Parses log lines, applies fail/ignore regular expressions, and feeds
/// matches into a [`FailManager`].
pub struct Filter {
    fail_regex: Vec<FailRegex>,
    ignore_regex: Vec<PlainRegex>,
    ignore_ip: IgnoreList,
    use_dns: UseDns,
    ipv6_ban_prefix: u8,
    find_time: i64,
    date_detector: DateDetector,
    resolver: Arc<dyn Resolver>,
    clock: Arc<dyn Clock>,
    pub fail_manager: FailManager,
}

impl Filter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut fail_manager = FailManager::new();
        fail_manager.set_max_time(600);
        fail_manager.set_max_retry(3);
        Self {
            fail_regex: Vec::new(),
            ignore_regex: Vec::new(),
            ignore_ip: IgnoreList::new(),
            use_dns: UseDns::Warn,
            ipv6_ban_prefix: 64,
            find_time: 600,
            date_detector: DateDetector::new(),
            resolver: Arc::new(SystemResolver),
            clock,
            fail_manager,
        }
    }

    /// Swaps the DNS resolver — used by tests to avoid real network I/O.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    // -- fail-regex management --------------------------------------

    pub fn add_fail_regex(&mut self, pattern: &str) -> Result<(), ConfigError> {
        self.fail_regex.push(FailRegex::new(pattern)?);
        Ok(())
    }

    pub fn del_fail_regex(&mut self, index: usize) -> Result<(), ConfigError> {
        if index >= self.fail_regex.len() {
            return Err(ConfigError::InvalidIndex(index));
        }
        self.fail_regex.remove(index);
        Ok(())
    }

    pub fn get_fail_regex(&self) -> Vec<&str> {
        self.fail_regex.iter().map(|r| r.pattern()).collect()
    }

    // -- ignore-regex management -------------------------------------

    pub fn add_ignore_regex(&mut self, pattern: &str) -> Result<(), ConfigError> {
        self.ignore_regex.push(PlainRegex::new(pattern)?);
        Ok(())
    }

    pub fn del_ignore_regex(&mut self, index: usize) -> Result<(), ConfigError> {
        if index >= self.ignore_regex.len() {
            return Err(ConfigError::InvalidIndex(index));
        }
        self.ignore_regex.remove(index);
        Ok(())
    }

    pub fn get_ignore_regex(&self) -> Vec<&str> {
        self.ignore_regex.iter().map(|r| r.pattern()).collect()
    }

    // -- scalar settings ----------------------------------------------

    pub fn set_find_time(&mut self, seconds: i64) {
        self.find_time = seconds;
        self.fail_manager.set_max_time(seconds);
    }

    pub fn find_time(&self) -> i64 {
        self.find_time
    }

    pub fn set_max_retry(&mut self, n: u32) {
        self.fail_manager.set_max_retry(n);
    }

    pub fn max_retry(&self) -> u32 {
        self.fail_manager.max_retry()
    }

    pub fn set_use_dns(&mut self, mode: UseDns) {
        self.use_dns = mode;
    }

    pub fn use_dns(&self) -> UseDns {
        self.use_dns
    }

    pub fn set_ipv6_ban_prefix(&mut self, prefix: u8) {
        self.ipv6_ban_prefix = prefix;
    }

    pub fn ipv6_ban_prefix(&self) -> u8 {
        self.ipv6_ban_prefix
    }

    // -- ignore-IP list -------------------------------------------------

    pub fn add_ignore_ip(&mut self, literal: &str) {
        self.ignore_ip.add(literal);
    }

    pub fn del_ignore_ip(&mut self, literal: &str) {
        self.ignore_ip.remove(literal);
    }

    pub fn get_ignore_ip(&self) -> Vec<&str> {
        self.ignore_ip.entries().collect()
    }

    fn in_ignore_ip_list(&self, ip: &str, family: Family) -> bool {
        self.ignore_ip.contains(self.resolver.as_ref(), ip, family)
    }

    /// `addBannedIP`: operator-forced ban. Synthesizes `maxRetry`
    /// synthetic failures for `ip[/prefix]`, then drains every ticket
    /// `toBan` yields for that prefix, then runs `cleanup`. Returns the
    /// drained tickets (handed to the jail exactly like any other ban).
    pub fn add_banned_ip(&mut self, ip_spec: &str) -> Vec<FailTicket> {
        let now = self.clock.now();
        let (addr, prefix_str) = ip_spec
            .split_once('/')
            .map_or((ip_spec, None), |(a, p)| (a, Some(p)));
        let family = address::ip_family(addr).unwrap_or(Family::V4);
        let prefix = prefix_str
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(|| family.default_prefix());

        for _ in 0..self.fail_manager.max_retry() {
            self.fail_manager
                .add_failure(FailTicket::new(addr, family, now).with_prefix(prefix));
        }

        let mut bans = Vec::new();
        loop {
            match self.fail_manager.to_ban(Some(prefix)) {
                Ok(ticket) => bans.push(ticket),
                Err(FailManagerEmpty) => break,
            }
        }
        self.fail_manager.cleanup(now);
        bans
    }

    /// `processLine`: splits the timestamp from the rest of the line and
    /// runs `findFailure` over the two halves.
    pub fn process_line(&mut self, line: &str) -> Vec<FailElement> {
        let (time_line, log_line) = match self.date_detector.match_time(line) {
            Some((start, end, _)) => (
                line[..end].to_string(),
                format!("{}{}", &line[..start], &line[end..]),
            ),
            None => (line.to_string(), line.to_string()),
        };
        self.find_failure(&time_line, &log_line)
    }

    /// `findFailure`: the ignore-regex pass (against `logLine`, per
    /// DESIGN.md) followed by the first-match-wins fail-regex pass.
    fn find_failure(&mut self, time_line: &str, log_line: &str) -> Vec<FailElement> {
        if self.ignore_line(log_line) {
            return Vec::new();
        }
        let mut result = Vec::new();
        for fail_regex in &mut self.fail_regex {
            fail_regex.search(log_line);
            if !fail_regex.has_matched() {
                continue;
            }
            let Some(date) = self.date_detector.get_unix_time(time_line) else {
                tracing::debug!(log_line, time_line, "match found but no valid date/time");
                continue;
            };
            let host = fail_regex.get_host().unwrap_or_default().to_string();
            let matches = address::text_to_ip(self.resolver.as_ref(), &host, self.use_dns);
            if matches.is_empty() {
                // Host resolved to nothing (DNS failure under `usedns=no`,
                // or unresolvable name): keep scanning later fail-regexes.
                continue;
            }
            for (family, ip) in matches {
                result.push(FailElement { ip, family, time: date });
            }
            break;
        }
        result
    }

    fn ignore_line(&mut self, log_line: &str) -> bool {
        for ignore_regex in &mut self.ignore_regex {
            ignore_regex.search(log_line);
            if ignore_regex.has_matched() {
                return true;
            }
        }
        false
    }

    /// `processLineAndAdd`: drives `process_line` and feeds every
    /// resulting element (subject to the window and ignore-list checks)
    /// into the FailManager.
    pub fn process_line_and_add(&mut self, line: &str) {
        for element in self.process_line(line) {
            tracing::debug!(time = element.time, ip = %element.ip, "processing line");
            if element.time < self.clock.now() - self.find_time {
                tracing::debug!("line older than findtime window, stopping");
                break;
            }
            if self.in_ignore_ip_list(&element.ip, element.family) {
                tracing::debug!(ip = %element.ip, "ignored");
                continue;
            }
            let ticket = match element.family {
                Family::V6 => {
                    let key_ip = address::truncate_to_prefix(
                        &element.ip,
                        self.ipv6_ban_prefix,
                        Family::V6,
                    )
                    .unwrap_or_else(|| element.ip.clone());
                    FailTicket::new(key_ip, Family::V6, element.time)
                        .with_prefix(self.ipv6_ban_prefix)
                        .with_match(line)
                }
                Family::V4 => FailTicket::new(&element.ip, Family::V4, element.time)
                    .with_prefix(32)
                    .with_match(line),
            };
            self.fail_manager.add_failure(ticket);
        }
    }
}

pub fn new_with_system_clock() -> Filter {
    Filter::new(Arc::new(SystemClock))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
