// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

#[yare::parameterized(
    v4_dotted = { "10.0.0.1", Some(Family::V4) },
    v6_bare = { "2001:db8::1", Some(Family::V6) },
    v6_bracketed = { "[2001:db8::1]", Some(Family::V6) },
    dns_name = { "not-an-ip", None },
    empty = { "", None },
)]
fn ip_family_recognizes_v4_and_v6(input: &str, expected: Option<Family>) {
    assert_eq!(ip_family(input), expected);
}

#[test]
fn text_to_ip_literal_ignores_usedns() {
    let resolver = SystemResolver;
    let result = text_to_ip(&resolver, "10.0.0.1", f2b_core::UseDns::No);
    assert_eq!(result, vec![(Family::V4, "10.0.0.1".to_string())]);
}

#[test]
fn text_to_ip_name_respects_no_policy() {
    let resolver = SystemResolver;
    assert!(text_to_ip(&resolver, "example.invalid.", f2b_core::UseDns::No).is_empty());
}

#[test]
fn cidr_truncates_v4() {
    let a = cidr("192.168.5.7", 16, Family::V4).unwrap();
    let b = cidr("192.168.200.200", 16, Family::V4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn truncate_to_prefix_v6_aggregates() {
    assert_eq!(
        truncate_to_prefix("2001:db8::1", 64, Family::V6).as_deref(),
        Some("2001:db8::")
    );
    assert_eq!(
        truncate_to_prefix("2001:db8::2", 64, Family::V6).as_deref(),
        Some("2001:db8::")
    );
}

#[test]
fn truncate_to_prefix_v4_is_identity_at_32() {
    assert_eq!(
        truncate_to_prefix("10.0.0.1", 32, Family::V4).as_deref(),
        Some("10.0.0.1")
    );
}
