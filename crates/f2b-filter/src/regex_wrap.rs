// SPDX-License-Identifier: GPL-2.0-or-later

//! Thin wrappers around `regex::Regex`: a plain matcher that remembers
//! its last match, and a specialization that additionally exposes the
//! `<HOST>` capture.

use crate::error::ConfigError;
use regex::Regex as Re;

/// Wraps a compiled pattern; `search` records the last match so
/// `has_matched` / `matched_text` can be queried afterward.
pub struct Regex {
    pattern: String,
    re: Re,
    last_match: Option<String>,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let re = Re::new(pattern).map_err(|source| ConfigError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            re,
            last_match: None,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn search(&mut self, line: &str) {
        self.last_match = self.re.find(line).map(|m| m.as_str().to_string());
    }

    pub fn has_matched(&self) -> bool {
        self.last_match.is_some()
    }
}

/// Specialization of [`Regex`] whose pattern must contain a named group
/// `HOST`. `get_host()` returns its captured text after a successful
/// `search`.
pub struct FailRegex {
    pattern: String,
    re: Re,
    last_host: Option<String>,
}

impl FailRegex {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let re = Re::new(pattern).map_err(|source| ConfigError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;
        if re.capture_names().flatten().all(|name| name != "HOST") {
            return Err(ConfigError::MissingHostGroup(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            re,
            last_host: None,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn search(&mut self, line: &str) {
        self.last_host = self
            .re
            .captures(line)
            .and_then(|caps| caps.name("HOST"))
            .map(|m| m.as_str().to_string());
    }

    pub fn has_matched(&self) -> bool {
        self.last_host.is_some()
    }

    /// The text captured by `<HOST>` from the most recent successful
    /// `search`. May be an IPv4 literal, an IPv6 literal (bracketed or
    /// bare), or a DNS name.
    pub fn get_host(&self) -> Option<&str> {
        self.last_host.as_deref()
    }
}

#[cfg(test)]
#[path = "regex_wrap_tests.rs"]
mod tests;
