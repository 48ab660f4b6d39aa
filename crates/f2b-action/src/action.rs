// SPDX-License-Identifier: GPL-2.0-or-later

//! One named action slot: five command templates, static `cInfo` tags,
//! and the check/restore invariant around `ban`/`unban`.

use crate::error::MitigationError;
use crate::exec;
use crate::tags::{self, TagMap};
use std::time::Duration;

/// The five command templates a jail configures per action.
#[derive(Debug, Clone, Default)]
pub struct Commands {
    pub start: String,
    pub check: String,
    pub ban: String,
    pub unban: String,
    pub stop: String,
}

/// A named mitigation action: command templates, static tags, and the
/// `passEnviron` flag controlling whether dynamic tags are additionally
/// exported as `FAIL2BAN_*` environment variables in the child.
pub struct Action {
    name: String,
    commands: Commands,
    c_info: TagMap,
    pass_environ: bool,
    timeout: Duration,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Commands::default(),
            c_info: TagMap::new(),
            pass_environ: false,
            timeout: exec::DEFAULT_TIMEOUT,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_c_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.c_info.insert(key.into(), value.into());
    }

    pub fn get_c_info(&self, key: &str) -> Option<&str> {
        self.c_info.get(key).map(String::as_str)
    }

    pub fn del_c_info(&mut self, key: &str) {
        self.c_info.remove(key);
    }

    pub fn set_pass_environ(&mut self, value: bool) {
        self.pass_environ = value;
    }

    pub fn pass_environ(&self) -> bool {
        self.pass_environ
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn set_command(&mut self, slot: Slot, template: impl Into<String>) {
        let template = template.into();
        match slot {
            Slot::Start => self.commands.start = template,
            Slot::Check => self.commands.check = template,
            Slot::Ban => self.commands.ban = template,
            Slot::Unban => self.commands.unban = template,
            Slot::Stop => self.commands.stop = template,
        }
    }

    pub fn get_command(&self, slot: Slot) -> &str {
        match slot {
            Slot::Start => &self.commands.start,
            Slot::Check => &self.commands.check,
            Slot::Ban => &self.commands.ban,
            Slot::Unban => &self.commands.unban,
            Slot::Stop => &self.commands.stop,
        }
    }

    /// Executes the `start` command, `cInfo`-substituted only (no
    /// `aInfo`: there is no per-event data at startup).
    pub fn exec_start(&self) -> Result<bool, MitigationError> {
        let cmd = tags::replace_tag(&self.commands.start, &self.c_info);
        self.execute_cmd(&cmd, &TagMap::new())
    }

    /// Executes the `stop` command, `cInfo`-substituted only.
    pub fn exec_stop(&self) -> Result<bool, MitigationError> {
        let cmd = tags::replace_tag(&self.commands.stop, &self.c_info);
        self.execute_cmd(&cmd, &TagMap::new())
    }

    /// Executes the `ban` command for `a_info`, preceded by the
    /// check/restore invariant.
    pub fn exec_ban(&self, a_info: &TagMap) -> Result<bool, MitigationError> {
        self.process_cmd(&self.commands.ban.clone(), a_info)
    }

    /// Executes the `unban` command for `a_info`, preceded by the
    /// check/restore invariant.
    pub fn exec_unban(&self, a_info: &TagMap) -> Result<bool, MitigationError> {
        self.process_cmd(&self.commands.unban.clone(), a_info)
    }

    /// Runs `check` first; on failure runs `stop` then `start` then
    /// retries `check`. If it still fails, returns
    /// [`MitigationError::RestoreFailed`] and the triggering ticket is
    /// abandoned. On success, substitutes `aInfo` then
    /// `cInfo` into `cmd` and executes it.
    fn process_cmd(&self, cmd: &str, a_info: &TagMap) -> Result<bool, MitigationError> {
        if cmd.is_empty() {
            tracing::debug!(action = %self.name, "nothing to do");
            return Ok(true);
        }

        let check_cmd = tags::replace_tag(&self.commands.check, &self.c_info);
        if !self.execute_cmd(&check_cmd, &TagMap::new())? {
            tracing::error!(
                action = %self.name,
                "invariant check failed, trying to restore a sane environment"
            );
            let stop_cmd = tags::replace_tag(&self.commands.stop, &self.c_info);
            self.execute_cmd(&stop_cmd, &TagMap::new())?;
            let start_cmd = tags::replace_tag(&self.commands.start, &self.c_info);
            self.execute_cmd(&start_cmd, &TagMap::new())?;
            if !self.execute_cmd(&check_cmd, &TagMap::new())? {
                tracing::error!(action = %self.name, "unable to restore environment");
                return Err(MitigationError::RestoreFailed {
                    action: self.name.clone(),
                });
            }
        }

        let real_cmd = tags::replace_tag(cmd, a_info);
        let real_cmd = tags::replace_tag(&real_cmd, &self.c_info);
        self.execute_cmd(&real_cmd, a_info)
    }

    /// Runs one already-substituted command. When `passEnviron` is set,
    /// every `(k, v)` in `cInfo ∪ aInfo` is exported as `FAIL2BAN_<k>`
    /// in the child's environment (the parent process's own
    /// environment is never touched).
    fn execute_cmd(&self, real_cmd: &str, a_info: &TagMap) -> Result<bool, MitigationError> {
        let env = if self.pass_environ {
            tags::merge(&self.c_info, a_info)
                .into_iter()
                .map(|(k, v)| (format!("FAIL2BAN_{k}"), v))
                .collect()
        } else {
            Vec::new()
        };
        exec::run_shell(real_cmd, &env, self.timeout)
    }
}

/// Which of the five command slots a setter/getter addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Start,
    Check,
    Ban,
    Unban,
    Stop,
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
