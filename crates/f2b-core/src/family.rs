// SPDX-License-Identifier: GPL-2.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network address family of a resolved origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Default CIDR prefix length used when no explicit prefix is given:
    /// always /32 for v4, /128 for v6 (the ignore-list default; the ban-key
    /// default for v6 is the jail's configured `ipv6banprefix`, see
    /// `f2b_filter::Filter`).
    pub fn default_prefix(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "v4"),
            Family::V6 => write!(f, "v6"),
        }
    }
}

/// Policy for resolving a captured `<HOST>` that is not itself an IP
/// literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UseDns {
    Yes,
    No,
    #[default]
    Warn,
}

impl std::str::FromStr for UseDns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(UseDns::Yes),
            "no" => Ok(UseDns::No),
            "warn" => Ok(UseDns::Warn),
            other => Err(format!("invalid usedns value: {other:?}")),
        }
    }
}

#[cfg(test)]
#[path = "family_tests.rs"]
mod tests;
