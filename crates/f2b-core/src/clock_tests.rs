// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::new(1000);
    assert_eq!(clock.now(), 1000);
    clock.advance(10);
    assert_eq!(clock.now(), 1010);
    clock.set(5);
    assert_eq!(clock.now(), 5);
}
