// SPDX-License-Identifier: GPL-2.0-or-later

//! The ignore list: IPs, CIDRs, and DNS names that never produce a
//! ticket regardless of how many times they fail, plus the config-error
//! guard for `usedns`.

use crate::address::{self, Resolver};
use f2b_core::Family;

/// One `(family, literal)` entry. `family` is looked up at insertion
/// time (`ip_family`); unknown strings are treated as DNS names and
/// resolved lazily at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    family: Option<Family>,
    literal: String,
}

/// Splits `addr/prefix` into its parts, defaulting the prefix to the
/// family's full width (32 / 128) when absent.
fn split_prefix(literal: &str, family: Family) -> (&str, u8) {
    match literal.split_once('/') {
        Some((addr, prefix)) => {
            let prefix = prefix.parse().unwrap_or_else(|_| family.default_prefix());
            (addr, prefix)
        }
        None => (literal, family.default_prefix()),
    }
}

#[derive(Default)]
pub struct IgnoreList {
    entries: Vec<Entry>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// `addIgnoreIP`: appends a literal, inferring its family at
    /// insertion time. Strings that don't parse as an IP/CIDR are
    /// assumed to be DNS names.
    pub fn add(&mut self, literal: impl Into<String>) {
        let literal = literal.into();
        let family = literal
            .split_once('/')
            .map_or(literal.as_str(), |(addr, _)| addr)
            .parse()
            .ok()
            .and_then(|ip: std::net::IpAddr| {
                Some(match ip {
                    std::net::IpAddr::V4(_) => Family::V4,
                    std::net::IpAddr::V6(_) => Family::V6,
                })
            });
        self.entries.push(Entry { family, literal });
    }

    /// `delIgnoreIP`: removes the first entry whose literal matches
    /// exactly. No-op if absent.
    pub fn remove(&mut self, literal: &str) {
        if let Some(idx) = self.entries.iter().position(|e| e.literal == literal) {
            self.entries.remove(idx);
        }
    }

    /// `getIgnoreIP`: the literals, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.literal.as_str())
    }

    /// `inIgnoreIPList`: true if `ip` (of `family`) matches any stored
    /// entry, either by CIDR containment (entries with a known family)
    /// or by resolving a DNS-name entry and comparing addresses
    /// pairwise. Returns on the first match.
    pub fn contains(&self, resolver: &dyn Resolver, ip: &str, family: Family) -> bool {
        for entry in &self.entries {
            match entry.family {
                Some(entry_family) => {
                    if entry_family != family {
                        continue;
                    }
                    let (addr, prefix) = split_prefix(&entry.literal, entry_family);
                    let a = address::cidr(addr, prefix, entry_family);
                    let b = address::cidr(ip, prefix, family);
                    if a.is_some() && a == b {
                        return true;
                    }
                }
                None => {
                    for (resolved_family, resolved_ip) in
                        address::dns_to_ip(resolver, &entry.literal)
                    {
                        if resolved_family == family && resolved_ip == ip {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "ignore_tests.rs"]
mod tests;
