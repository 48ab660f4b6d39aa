// SPDX-License-Identifier: GPL-2.0-or-later

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("jail {jail:?} regex error: {source}")]
    Regex {
        jail: String,
        #[source]
        source: f2b_filter::ConfigError,
    },
    #[error("jail {0:?} could not open logpath {1:?}: {2}")]
    Watch(String, PathBuf, #[source] f2b_watch::WatchError),
}
