// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

#[test]
fn detects_iso8601_with_comma_millis() {
    let d = DateDetector::new();
    let line = "2026-07-28 10:15:30,123 sshd[1]: Failed password for root from 10.0.0.1";
    let (_, _, span) = d.match_time(line).expect("timestamp found");
    let unix = d.get_unix_time(span).expect("parses");
    assert!(unix > 0);
}

#[test]
fn detects_epoch_seconds() {
    let d = DateDetector::new();
    let line = "1753698930 Failed login from 10.0.0.1";
    let (_, _, span) = d.match_time(line).expect("timestamp found");
    assert_eq!(d.get_unix_time(span), Some(1753698930));
}

#[test]
fn no_timestamp_returns_none() {
    let d = DateDetector::new();
    assert_eq!(d.match_time("no time here at all"), None);
}

#[test]
fn rfc3339_parses() {
    assert_eq!(parse_rfc3339("2026-07-28T10:15:30Z"), Some(1785233730));
}
