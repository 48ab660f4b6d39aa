// SPDX-License-Identifier: GPL-2.0-or-later

//! Tag substitution: `<identifier>` placeholders
//! plus the literal `<br>` for newline. No nesting, no escaping.

use std::collections::BTreeMap;

/// An ordered static-or-dynamic tag map. `BTreeMap` keeps substitution
/// order deterministic, which matters when two tags are substrings of
/// each other (unlikely with the `[A-Za-z_][A-Za-z0-9_]*` grammar, but
/// cheap to guarantee).
pub type TagMap = BTreeMap<String, String>;

/// `replaceTag`: substitutes every `<k>` in `template` with `str(v)` for
/// each `(k, v)` in `tags`, then replaces `<br>` with a newline. Unknown
/// tags are left verbatim in the output.
pub fn replace_tag(template: &str, tags: &TagMap) -> String {
    let mut out = template.to_string();
    for (key, value) in tags {
        let needle = format!("<{key}>");
        out = out.replace(&needle, value);
    }
    out.replace("<br>", "\n")
}

/// Merges two tag maps, with `b` taking precedence on key collision —
/// used to assemble `cInfo ∪ aInfo` for environment export.
pub fn merge(a: &TagMap, b: &TagMap) -> TagMap {
    let mut merged = a.clone();
    merged.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
