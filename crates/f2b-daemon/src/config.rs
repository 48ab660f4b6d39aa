// SPDX-License-Identifier: GPL-2.0-or-later

//! Typed configuration surface.
//!
//! This is the shape a real operator-facing config reader (fail2ban's
//! `.conf`/`.local` ini dialect) would populate; it is not that file
//! format itself, which is left to whatever loader an operator wires up.
//! Here the surface is just TOML, deserialized with `serde`.

use crate::error::DaemonError;
use f2b_core::UseDns;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

fn default_findtime() -> i64 {
    600
}

fn default_maxretry() -> u32 {
    3
}

fn default_ipv6banprefix() -> u8 {
    64
}

fn default_bantime() -> i64 {
    600
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// One action slot as read from config: five command templates plus the
/// static tags and `passenviron` flag.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    pub name: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub check: String,
    #[serde(default)]
    pub ban: String,
    #[serde(default)]
    pub unban: String,
    #[serde(default)]
    pub stop: String,
    #[serde(default)]
    pub passenviron: bool,
    #[serde(default)]
    pub cinfo: BTreeMap<String, String>,
}

/// One jail: a filter configuration, the log paths it watches, and the
/// actions it drives.
#[derive(Debug, Clone, Deserialize)]
pub struct JailConfig {
    pub name: String,
    #[serde(default)]
    pub logpath: Vec<String>,
    #[serde(default)]
    pub tail: bool,
    #[serde(default = "default_findtime")]
    pub findtime: i64,
    #[serde(default = "default_maxretry")]
    pub maxretry: u32,
    #[serde(default)]
    pub usedns: UseDns,
    #[serde(default = "default_ipv6banprefix")]
    pub ipv6banprefix: u8,
    #[serde(default = "default_bantime")]
    pub bantime: i64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub failregex: Vec<String>,
    #[serde(default)]
    pub ignoreregex: Vec<String>,
    #[serde(default)]
    pub ignoreip: Vec<String>,
    #[serde(default)]
    pub action: Vec<ActionConfig>,
}

/// The whole daemon config: a list of jails, each independently wired.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonConfig {
    #[serde(default, rename = "jail")]
    pub jails: Vec<JailConfig>,
}

impl DaemonConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DaemonError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DaemonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, DaemonError> {
        toml::from_str(text).map_err(|source| DaemonError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
