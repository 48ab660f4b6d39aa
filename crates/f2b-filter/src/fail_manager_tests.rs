// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

fn ticket(ip: &str, time: i64) -> FailTicket {
    FailTicket::new(ip, Family::V4, time)
}

#[test]
fn fresh_key_starts_at_one_attempt() {
    let mut fm = FailManager::new();
    fm.add_failure(ticket("10.0.0.1", 1000));
    assert_eq!(fm.size(), 1);
    assert_eq!(fm.get_fail_total(), 1);
}

#[test]
fn within_window_merges_and_counts_up() {
    let mut fm = FailManager::new();
    fm.set_max_time(600);
    fm.add_failure(ticket("10.0.0.1", 1000));
    fm.add_failure(ticket("10.0.0.1", 1010));
    fm.add_failure(ticket("10.0.0.1", 1020));
    assert_eq!(fm.size(), 1);
    assert_eq!(fm.get_fail_total(), 3);
}

#[test]
fn outside_window_restarts_the_count() {
    let mut fm = FailManager::new();
    fm.set_max_time(600);
    fm.add_failure(ticket("10.0.0.1", 1000));
    fm.add_failure(ticket("10.0.0.1", 1000 + 601));
    let entry = fm.entries.values().next().expect("one entry");
    assert_eq!(entry.attempts, 1);
}

#[test]
fn to_ban_requires_threshold() {
    let mut fm = FailManager::new();
    fm.set_max_retry(3);
    fm.add_failure(ticket("10.0.0.1", 1000));
    fm.add_failure(ticket("10.0.0.1", 1010));
    assert!(fm.to_ban(None).is_err());
    fm.add_failure(ticket("10.0.0.1", 1020));
    let t = fm.to_ban(None).expect("threshold crossed");
    assert_eq!(t.attempts, 3);
    assert_eq!(fm.size(), 0);
}

#[test]
fn to_ban_prefers_earliest_latest() {
    let mut fm = FailManager::new();
    fm.set_max_retry(1);
    fm.add_failure(ticket("10.0.0.2", 2000));
    fm.add_failure(ticket("10.0.0.1", 1000));
    let t = fm.to_ban(None).expect("one qualifies");
    assert_eq!(t.ip, "10.0.0.1");
}

#[test]
fn cleanup_drops_stale_entries() {
    let mut fm = FailManager::new();
    fm.set_max_time(600);
    fm.add_failure(ticket("10.0.0.1", 1000));
    fm.cleanup(1000 + 601);
    assert_eq!(fm.size(), 0);
}

#[test]
fn sum_of_attempts_never_exceeds_fail_total() {
    let mut fm = FailManager::new();
    fm.add_failure(ticket("10.0.0.1", 1000));
    fm.add_failure(ticket("10.0.0.2", 1000));
    fm.add_failure(ticket("10.0.0.1", 1001));
    let sum: u32 = fm.entries.values().map(|t| t.attempts).sum();
    assert!(u64::from(sum) <= fm.get_fail_total());
}
