// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

#[test]
fn fail_regex_requires_host_group() {
    assert!(FailRegex::new(r"Failed login from (?P<ip>\S+)").is_err());
    assert!(FailRegex::new(r"Failed login from (?P<HOST>\S+)").is_ok());
}

#[test]
fn fail_regex_captures_host() {
    let mut re = FailRegex::new(r"Failed login from (?P<HOST>\S+)").unwrap();
    re.search("Failed login from 10.0.0.1");
    assert_eq!(re.get_host(), Some("10.0.0.1"));
    assert!(re.has_matched());
}

#[test]
fn fail_regex_no_match_clears_host() {
    let mut re = FailRegex::new(r"Failed login from (?P<HOST>\S+)").unwrap();
    re.search("Accepted login from 10.0.0.1");
    assert!(!re.has_matched());
    assert_eq!(re.get_host(), None);
}

#[test]
fn plain_regex_tracks_last_match() {
    let mut re = Regex::new(r"ignore me").unwrap();
    re.search("please ignore me now");
    assert!(re.has_matched());
    re.search("nothing here");
    assert!(!re.has_matched());
}
