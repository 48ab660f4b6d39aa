// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;
use crate::address::SystemResolver;

#[test]
fn cidr_entry_matches_contained_address() {
    let mut list = IgnoreList::new();
    list.add("192.168.0.0/16");
    let resolver = SystemResolver;
    assert!(list.contains(&resolver, "192.168.5.7", Family::V4));
    assert!(!list.contains(&resolver, "10.0.0.1", Family::V4));
}

#[test]
fn bare_ip_defaults_to_full_width_prefix() {
    let mut list = IgnoreList::new();
    list.add("10.0.0.1");
    let resolver = SystemResolver;
    assert!(list.contains(&resolver, "10.0.0.1", Family::V4));
    assert!(!list.contains(&resolver, "10.0.0.2", Family::V4));
}

#[test]
fn add_then_remove_restores_prior_answer() {
    let mut list = IgnoreList::new();
    let resolver = SystemResolver;
    let before = list.contains(&resolver, "10.0.0.1", Family::V4);
    list.add("10.0.0.1/32");
    assert!(list.contains(&resolver, "10.0.0.1", Family::V4));
    list.remove("10.0.0.1/32");
    assert_eq!(list.contains(&resolver, "10.0.0.1", Family::V4), before);
}
