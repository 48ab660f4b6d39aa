// SPDX-License-Identifier: GPL-2.0-or-later

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_all(path: &Path, contents: &str) {
    let mut f = File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn reads_from_start_when_not_tailing() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "A\nB\n");
    let mut c = FileContainer::new(tmp.path(), false).unwrap();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "A\n");
    assert_eq!(c.readline().unwrap(), "B\n");
    assert_eq!(c.readline().unwrap(), "");
    c.close();
}

#[test]
fn tail_mode_starts_at_eof() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "A\nB\n");
    let mut c = FileContainer::new(tmp.path(), true).unwrap();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "");
    c.close();
}

#[test]
fn open_read_close_then_open_readline_is_empty_without_new_bytes() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "A\n");
    let mut c = FileContainer::new(tmp.path(), false).unwrap();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "A\n");
    c.close();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "");
    c.close();
}

#[test]
fn rotation_resets_position_and_delivers_new_content() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "A\nB\n");
    let mut c = FileContainer::new(tmp.path(), false).unwrap();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "A\n");
    assert_eq!(c.readline().unwrap(), "B\n");
    c.close();

    // Simulate rotation: replace the file with new content whose
    // first line differs. NamedTempFile::path() is stable even
    // across this create() call, which truncates-and-rewrites.
    write_all(tmp.path(), "C\nD\n");

    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "C\n");
    assert_eq!(c.readline().unwrap(), "D\n");
    assert_eq!(c.readline().unwrap(), "");
    c.close();
}

#[test]
fn empty_file_has_well_defined_fingerprint() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "");
    let mut c = FileContainer::new(tmp.path(), false).unwrap();
    c.open().unwrap();
    assert_eq!(c.readline().unwrap(), "");
    c.close();
}

#[test]
fn reopening_without_close_is_an_error() {
    let tmp = NamedTempFile::new().unwrap();
    write_all(tmp.path(), "A\n");
    let mut c = FileContainer::new(tmp.path(), false).unwrap();
    c.open().unwrap();
    assert!(matches!(c.open(), Err(WatchError::AlreadyOpen(_))));
}
