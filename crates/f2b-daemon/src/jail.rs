// SPDX-License-Identifier: GPL-2.0-or-later

//! Jail glue: wires one [`Filter`] to its configured log
//! paths and actions — one worker thread per log path, one ban-dispatcher
//! thread that drains threshold-crossed tickets and runs `ban`/`unban`,
//! tracking each ban's expiry so the unban eventually runs too.

use crate::config::JailConfig;
use crate::error::DaemonError;
use crate::worker;
use f2b_action::{Action, Slot, TagMap};
use f2b_core::{Clock, FailTicket, Family, SystemClock};
use f2b_filter::Filter;
use f2b_watch::FileContainer;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A ban awaiting its `unban` once `unban_at` (epoch seconds) is reached.
/// The jail keeps this in memory only — persisted ban lifetime tracking
/// is explicitly outside the core's scope; restarting the daemon
/// forgets in-flight bans rather than persisting ban history anywhere.
struct PendingUnban {
    ip: String,
    a_info: TagMap,
    unban_at: i64,
}

fn ticket_to_tags(ticket: &FailTicket) -> TagMap {
    [
        ("ip".to_string(), ticket.ip.clone()),
        ("family".to_string(), ticket.family.to_string()),
        ("failures".to_string(), ticket.attempts.to_string()),
        ("time".to_string(), ticket.time.to_string()),
    ]
    .into_iter()
    .collect()
}

/// Drains every ticket currently eligible for a ban, runs `ban` on every
/// configured action, and schedules the matching `unban`. Used by both
/// the dispatcher thread's poll loop and `Jail::force_ban`.
fn dispatch_bans(
    jail_name: &str,
    filter: &Mutex<Filter>,
    actions: &[Action],
    bans: &Mutex<Vec<PendingUnban>>,
    now: i64,
    bantime: i64,
) {
    loop {
        let ticket = match filter.lock().fail_manager.to_ban(None) {
            Ok(ticket) => ticket,
            Err(_) => break,
        };
        let a_info = ticket_to_tags(&ticket);
        for action in actions {
            match action.exec_ban(&a_info) {
                Ok(true) => {
                    tracing::info!(jail = jail_name, ip = %ticket.ip, action = action.name(), "banned")
                }
                Ok(false) => {
                    tracing::error!(jail = jail_name, ip = %ticket.ip, action = action.name(), "ban command returned nonzero")
                }
                Err(err) => {
                    tracing::error!(jail = jail_name, ip = %ticket.ip, action = action.name(), %err, "ban failed")
                }
            }
        }
        bans.lock().push(PendingUnban {
            ip: ticket.ip.clone(),
            a_info,
            unban_at: now + bantime,
        });
    }
}

fn dispatch_due_unbans(jail_name: &str, actions: &[Action], bans: &Mutex<Vec<PendingUnban>>, now: i64) {
    let due = {
        let mut guard = bans.lock();
        let (due, remaining): (Vec<_>, Vec<_>) =
            std::mem::take(&mut *guard).into_iter().partition(|b| b.unban_at <= now);
        *guard = remaining;
        due
    };
    for pending in due {
        for action in actions {
            match action.exec_unban(&pending.a_info) {
                Ok(_) => tracing::info!(jail = jail_name, ip = %pending.ip, action = action.name(), "unbanned"),
                Err(err) => {
                    tracing::error!(jail = jail_name, ip = %pending.ip, action = action.name(), %err, "unban failed")
                }
            }
        }
    }
}

/// A named association of one filter, the log paths feeding it, and the
/// actions it drives.
pub struct Jail {
    name: String,
    logpaths: Vec<String>,
    tail: bool,
    filter: Arc<Mutex<Filter>>,
    actions: Arc<Vec<Action>>,
    bantime: i64,
    clock: Arc<dyn Clock>,
    stop: Arc<AtomicBool>,
    poll_interval: Duration,
    workers: Vec<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<()>>,
    bans: Arc<Mutex<Vec<PendingUnban>>>,
}

impl Jail {
    pub fn new(config: &JailConfig) -> Result<Self, DaemonError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &JailConfig, clock: Arc<dyn Clock>) -> Result<Self, DaemonError> {
        let mut filter = Filter::new(clock.clone());
        filter.set_find_time(config.findtime);
        filter.set_max_retry(config.maxretry);
        filter.set_use_dns(config.usedns);
        filter.set_ipv6_ban_prefix(config.ipv6banprefix);
        for pattern in &config.failregex {
            filter
                .add_fail_regex(pattern)
                .map_err(|source| DaemonError::Regex { jail: config.name.clone(), source })?;
        }
        for pattern in &config.ignoreregex {
            filter
                .add_ignore_regex(pattern)
                .map_err(|source| DaemonError::Regex { jail: config.name.clone(), source })?;
        }
        for literal in &config.ignoreip {
            filter.add_ignore_ip(literal);
        }

        let actions = config
            .action
            .iter()
            .map(|a| {
                let mut action = Action::new(&a.name);
                action.set_command(Slot::Start, &a.start);
                action.set_command(Slot::Check, &a.check);
                action.set_command(Slot::Ban, &a.ban);
                action.set_command(Slot::Unban, &a.unban);
                action.set_command(Slot::Stop, &a.stop);
                action.set_pass_environ(a.passenviron);
                for (key, value) in &a.cinfo {
                    action.set_c_info(key, value);
                }
                action
            })
            .collect();

        Ok(Self {
            name: config.name.clone(),
            logpaths: config.logpath.clone(),
            tail: config.tail,
            filter: Arc::new(Mutex::new(filter)),
            actions: Arc::new(actions),
            bantime: config.bantime,
            clock,
            stop: Arc::new(AtomicBool::new(false)),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            workers: Vec::new(),
            dispatcher: None,
            bans: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &Arc<Mutex<Filter>> {
        &self.filter
    }

    /// Runs `start` for every action, opens each configured log path, and
    /// spawns one worker thread per path plus one ban-dispatcher thread.
    pub fn start(&mut self) -> Result<(), DaemonError> {
        for action in self.actions.iter() {
            if let Err(err) = action.exec_start() {
                tracing::error!(jail = %self.name, action = action.name(), %err, "start failed");
            }
        }

        for path in &self.logpaths {
            let container = FileContainer::new(path, self.tail)
                .map_err(|source| DaemonError::Watch(self.name.clone(), PathBuf::from(path), source))?;
            let filter = self.filter.clone();
            let stop = self.stop.clone();
            let poll_interval = self.poll_interval;
            let jail_name = self.name.clone();
            self.workers
                .push(thread::spawn(move || worker::run(&jail_name, container, filter, stop, poll_interval)));
        }

        let filter = self.filter.clone();
        let actions = self.actions.clone();
        let bans = self.bans.clone();
        let stop = self.stop.clone();
        let clock = self.clock.clone();
        let bantime = self.bantime;
        let poll_interval = self.poll_interval;
        let jail_name = self.name.clone();
        self.dispatcher = Some(thread::spawn(move || loop {
            let stopping = stop.load(Ordering::Relaxed);
            let now = clock.now();
            dispatch_bans(&jail_name, &filter, &actions, &bans, now, bantime);
            filter.lock().fail_manager.cleanup(now);
            dispatch_due_unbans(&jail_name, &actions, &bans, now);
            if stopping {
                break;
            }
            thread::sleep(poll_interval);
        }));

        Ok(())
    }

    /// Operator-forced ban (`addBannedIP`): synthesizes failures
    /// directly on the filter, then dispatches any resulting tickets
    /// exactly as the poll loop would.
    pub fn force_ban(&self, ip_spec: &str) {
        let now = self.clock.now();
        let tickets = self.filter.lock().add_banned_ip(ip_spec);
        for ticket in tickets {
            let a_info = ticket_to_tags(&ticket);
            for action in self.actions.iter() {
                if let Err(err) = action.exec_ban(&a_info) {
                    tracing::error!(jail = %self.name, ip = %ticket.ip, action = action.name(), %err, "forced ban failed");
                }
            }
            self.bans.lock().push(PendingUnban {
                ip: ticket.ip,
                a_info,
                unban_at: now + self.bantime,
            });
        }
    }

    /// Signals every worker and the dispatcher to stop, joins them, and
    /// finally runs `stop` for every action.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        if let Some(dispatcher) = self.dispatcher.take() {
            let _ = dispatcher.join();
        }
        for action in self.actions.iter() {
            if let Err(err) = action.exec_stop() {
                tracing::error!(jail = %self.name, action = action.name(), %err, "stop failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "jail_tests.rs"]
mod tests;
