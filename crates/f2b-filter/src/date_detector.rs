// SPDX-License-Identifier: GPL-2.0-or-later

//! Timestamp extraction.
//!
//! Full auto-detection across a large template library (strptime-ish
//! patterns plus oddballs like epoch seconds) is treated as a black-box
//! interface here, implemented against a small, fixed set of templates
//! that cover the overwhelming majority of real service logs — enough to
//! drive the filter end-to-end in tests and the example daemon, without
//! claiming to replace a full auto-detection corpus.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

struct Template {
    /// Matches the timestamp span within a line.
    finder: Regex,
    /// strptime-style format consumed by `NaiveDateTime::parse_from_str`.
    format: &'static str,
}

/// Detects and parses the timestamp prefix of a log line against a fixed
/// set of common formats, in order. The first template whose `finder`
/// matches wins, stopping at the first template that matches.
pub struct DateDetector {
    templates: Vec<Template>,
}

impl Default for DateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DateDetector {
    /// Builds the detector with its default template set.
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let templates = vec![
            // ISO 8601 / RFC 3339, e.g. "2026-07-28T10:15:30+00:00" or
            // "2026-07-28 10:15:30,123"
            Template {
                finder: Regex::new(
                    r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d+)?(?:Z|[+-]\d{2}:?\d{2})?",
                )
                .expect("constant regex pattern is valid"),
                format: "%Y-%m-%dT%H:%M:%S",
            },
            // syslog, e.g. "Jul 28 10:15:30"
            Template {
                finder: Regex::new(r"[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}")
                    .expect("constant regex pattern is valid"),
                format: "%b %e %H:%M:%S",
            },
            // epoch seconds, e.g. "1753698930"
            Template {
                finder: Regex::new(r"\b\d{10}\b").expect("constant regex pattern is valid"),
                format: "epoch",
            },
        ];
        Self { templates }
    }

    /// Returns the matched timestamp's byte range and text within
    /// `line`, if any template recognizes it.
    pub fn match_time<'a>(&self, line: &'a str) -> Option<(usize, usize, &'a str)> {
        for template in &self.templates {
            if let Some(m) = template.finder.find(line) {
                return Some((m.start(), m.end(), m.as_str()));
            }
        }
        None
    }

    /// Parses a previously matched timestamp span into seconds since the
    /// Unix epoch. Returns `None` on any parse failure — callers treat
    /// this as a soft date-parse failure: log and drop the line.
    pub fn get_unix_time(&self, time_line: &str) -> Option<i64> {
        for template in &self.templates {
            let Some(m) = template.finder.find(time_line) else {
                continue;
            };
            let span = m.as_str();
            if template.format == "epoch" {
                return span.parse::<i64>().ok();
            }
            // Normalize the fractional-seconds separator and timezone
            // suffix that chrono's non-%.f parse doesn't accept alongside
            // a bare %H:%M:%S format.
            let normalized = span.replace(',', ".").replace('T', " ");
            let base = normalized.split(['.', 'Z', '+']).next().unwrap_or(&normalized);
            if let Ok(naive) = NaiveDateTime::parse_from_str(base, "%Y-%m-%d %H:%M:%S") {
                return Some(Utc.from_utc_datetime(&naive).timestamp());
            }
            if let Ok(naive) =
                NaiveDateTime::parse_from_str(&format!("2026 {base}"), "%Y %b %e %H:%M:%S")
            {
                return Some(Utc.from_utc_datetime(&naive).timestamp());
            }
        }
        None
    }
}

/// Parses a full RFC 3339 timestamp directly, bypassing template
/// detection — used by tests that want exact control over `time`.
pub fn parse_rfc3339(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

#[cfg(test)]
#[path = "date_detector_tests.rs"]
mod tests;
