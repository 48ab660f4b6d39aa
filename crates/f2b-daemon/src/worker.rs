// SPDX-License-Identifier: GPL-2.0-or-later

//! One scan loop per monitored log path: one `std::thread` per
//! monitored log path, following the upstream `JailThread` shape.

use f2b_filter::Filter;
use f2b_watch::FileContainer;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Repeatedly opens `container`, drains every line currently available
/// into `filter`, closes it, then sleeps `poll_interval` before the next
/// pass. Exits as soon as the next readline would block (EOF) *and*
/// `stop` has been set — so a final pass after `stop()` still drains
/// whatever arrived just before shutdown.
pub fn run(
    jail: &str,
    mut container: FileContainer,
    filter: Arc<Mutex<Filter>>,
    stop: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    loop {
        let stopping = stop.load(Ordering::Relaxed);
        match container.open() {
            Ok(()) => {
                loop {
                    let line = match container.readline() {
                        Ok(line) => line,
                        Err(err) => {
                            tracing::error!(jail, path = %container.path().display(), %err, "read failed");
                            break;
                        }
                    };
                    if line.is_empty() {
                        break;
                    }
                    filter.lock().process_line_and_add(&line);
                }
                container.close();
            }
            Err(err) => {
                tracing::error!(jail, path = %container.path().display(), %err, "open failed");
            }
        }
        if stopping {
            break;
        }
        std::thread::sleep(poll_interval);
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
