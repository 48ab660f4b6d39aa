// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

fn map(pairs: &[(&str, &str)]) -> TagMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[yare::parameterized(
    known_tags_and_br = {
        "ban <ip> on port <port><br>done",
        &[("ip", "10.0.0.1"), ("port", "22")],
        "ban 10.0.0.1 on port 22\ndone",
    },
    unknown_tag_left_verbatim = {
        "<ip> <unknown>",
        &[("ip", "10.0.0.1")],
        "10.0.0.1 <unknown>",
    },
    repeated_tag_replaced_everywhere = {
        "<ip>-<ip>",
        &[("ip", "10.0.0.1")],
        "10.0.0.1-10.0.0.1",
    },
)]
fn replace_tag_cases(template: &str, pairs: &[(&str, &str)], expected: &str) {
    assert_eq!(replace_tag(template, &map(pairs)), expected);
}

#[test]
fn sequential_replace_matches_disjoint_merge() {
    // replaceTag(replaceTag(t, a), b) ==
    // replaceTag(t, a ∪ b) when a and b have disjoint keys.
    let a = map(&[("ip", "10.0.0.1")]);
    let b = map(&[("port", "22")]);
    let t = "<ip>:<port>";
    let sequential = replace_tag(&replace_tag(t, &a), &b);
    let merged = replace_tag(t, &merge(&a, &b));
    assert_eq!(sequential, merged);
}
