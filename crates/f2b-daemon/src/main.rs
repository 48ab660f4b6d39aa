// SPDX-License-Identifier: GPL-2.0-or-later

//! Example binary wiring a [`DaemonConfig`] into running [`Jail`]s.
//!
//! This demonstrates end-to-end wiring, not a production init-system
//! integration: there is no control socket or PID file, since the
//! CLI/IPC layer that would manage those is left to other tooling.
//! Runs until killed.

use f2b_daemon::{DaemonConfig, Jail};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "f2b.toml".to_string());
    let config = match DaemonConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "failed to load config");
            std::process::exit(1);
        }
    };

    let mut jails = Vec::new();
    for jail_config in &config.jails {
        match Jail::new(jail_config) {
            Ok(mut jail) => {
                if let Err(err) = jail.start() {
                    tracing::error!(jail = jail_config.name, %err, "failed to start jail");
                    continue;
                }
                tracing::info!(jail = jail_config.name, "jail started");
                jails.push(jail);
            }
            Err(err) => tracing::error!(jail = jail_config.name, %err, "failed to build jail"),
        }
    }

    if jails.is_empty() {
        tracing::warn!("no jails started, exiting");
        return;
    }

    loop {
        std::thread::sleep(Duration::from_secs(60));
    }
}
