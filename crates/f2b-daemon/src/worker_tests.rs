// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;
use f2b_core::FakeClock;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[test]
fn drains_existing_lines_then_stops() {
    let tmp = NamedTempFile::new().unwrap();
    writeln!(tmp.as_file(), "1700000000 Failed login from 10.0.0.1").unwrap();
    let container = FileContainer::new(tmp.path(), false).unwrap();

    let clock = Arc::new(FakeClock::new(1_700_000_000));
    let mut raw_filter = Filter::new(clock);
    raw_filter
        .add_fail_regex(r"Failed login from (?P<HOST>\S+)")
        .unwrap();
    raw_filter.set_max_retry(1);
    let filter = Arc::new(Mutex::new(raw_filter));
    let stop = Arc::new(AtomicBool::new(true));

    run("test", container, filter.clone(), stop, Duration::from_millis(1));

    assert_eq!(filter.lock().fail_manager.size(), 1);
}
