// SPDX-License-Identifier: GPL-2.0-or-later

//! Address parsing, DNS resolution, and CIDR comparison used by the
//! filter pipeline and the ignore list.

use f2b_core::Family;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

/// Pure parse, no I/O: does `s` parse as an IP literal (optionally
/// bracketed, for IPv6)?
pub fn ip_family(s: &str) -> Option<Family> {
    let trimmed = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(s);
    match trimmed.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => Some(Family::V4),
        Ok(IpAddr::V6(_)) => Some(Family::V6),
        Err(_) => None,
    }
}

/// Resolves a DNS name to every address it has, blocking. Returns an
/// empty vec on any resolution failure (treated as "no match" by callers,
/// per the resolve-error policy: unresolvable is simply "no match").
pub trait Resolver: Send + Sync {
    fn resolve(&self, name: &str) -> Vec<(Family, String)>;
}

/// Resolves via the system resolver (`getaddrinfo`), reusing
/// `ToSocketAddrs`'s existing plumbing with a dummy port.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, name: &str) -> Vec<(Family, String)> {
        match (name, 0u16).to_socket_addrs() {
            Ok(addrs) => addrs
                .map(|a| match a.ip() {
                    IpAddr::V4(ip) => (Family::V4, ip.to_string()),
                    IpAddr::V6(ip) => (Family::V6, ip.to_string()),
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// `dnsToIp`: resolve `name` to every `(family, ip)` pair it has.
pub fn dns_to_ip(resolver: &dyn Resolver, name: &str) -> Vec<(Family, String)> {
    resolver.resolve(name)
}

/// `textToIp`: resolve a captured `<HOST>` per the `usedns` policy.
///
/// - An IP literal is always returned as a singleton, regardless of policy.
/// - Otherwise: `no` returns nothing; `yes` resolves; `warn` resolves and
///   the caller should log a diagnostic (the first time per host — callers
///   own that dedup, this function is stateless).
pub fn text_to_ip(
    resolver: &dyn Resolver,
    host: &str,
    use_dns: f2b_core::UseDns,
) -> Vec<(Family, String)> {
    if let Some(family) = ip_family(host) {
        let literal = host
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(host);
        return vec![(family, literal.to_string())];
    }
    match use_dns {
        f2b_core::UseDns::No => Vec::new(),
        f2b_core::UseDns::Yes | f2b_core::UseDns::Warn => dns_to_ip(resolver, host),
    }
}

/// Canonical bitstring of the network portion of `ip` at `prefix`, for
/// equality comparison. Returns `None` if `ip` doesn't parse as `family`.
pub fn cidr(ip: &str, prefix: u8, family: Family) -> Option<Vec<u8>> {
    match family {
        Family::V4 => {
            let addr: Ipv4Addr = ip.parse().ok()?;
            let prefix = prefix.min(32);
            let mask: u32 = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - prefix)
            };
            Some((u32::from(addr) & mask).to_be_bytes().to_vec())
        }
        Family::V6 => {
            let stripped = ip.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(ip);
            let addr: Ipv6Addr = stripped.parse().ok()?;
            let prefix = prefix.min(128);
            let mask: u128 = if prefix == 0 {
                0
            } else {
                u128::MAX << (128 - prefix)
            };
            Some((u128::from(addr) & mask).to_be_bytes().to_vec())
        }
    }
}

/// Textual network address used as the ban key: `ip` truncated to
/// `prefix` bits, rendered back as an address literal (e.g.
/// `2001:db8::` for `2001:db8::1/64`).
pub fn truncate_to_prefix(ip: &str, prefix: u8, family: Family) -> Option<String> {
    match family {
        Family::V4 => {
            let addr: Ipv4Addr = ip.parse().ok()?;
            let prefix = prefix.min(32);
            let mask: u32 = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - prefix)
            };
            Some(Ipv4Addr::from(u32::from(addr) & mask).to_string())
        }
        Family::V6 => {
            let stripped = ip.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(ip);
            let addr: Ipv6Addr = stripped.parse().ok()?;
            let prefix = prefix.min(128);
            let mask: u128 = if prefix == 0 {
                0
            } else {
                u128::MAX << (128 - prefix)
            };
            Some(Ipv6Addr::from(u128::from(addr) & mask).to_string())
        }
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
