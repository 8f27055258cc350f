use std::fs;
use std::path::Path;

use bisect_core::HarnessConfig;
use bisect_store::{switch_tmp, switch_to_bad, switch_to_good, FileStore};
use tempfile::tempdir;

fn seed_session(dir: &Path, objects: &str, working: &str) -> FileStore {
    fs::write(dir.join("objects.txt"), objects).expect("objects");
    fs::write(dir.join("working_set.txt"), working).expect("working set");
    FileStore::new(HarnessConfig::in_dir(dir))
}

fn write_selection(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("selection");
    path
}

#[test]
fn good_then_bad_round_trips_the_worked_example() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = write_selection(dir.path(), "sel.txt", "1\n");

    let outcome = switch_to_good(&store, &selection).expect("to good");
    assert_eq!(outcome.changed, 1);
    assert_eq!(store.read_working_set().expect("read"), vec![5, 0, 7]);
    assert_eq!(
        fs::read_to_string(dir.path().join("working_set.txt")).expect("raw"),
        "5\n0\n7\n"
    );

    switch_to_bad(&store, &selection).expect("to bad");
    assert_eq!(store.read_working_set().expect("read"), vec![5, 1, 7]);
}

#[test]
fn repeated_switch_is_idempotent() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "4\n8\n15\n16\n", "4\n8\n15\n16\n");
    let selection = write_selection(dir.path(), "sel.txt", "0\n3\n");
    switch_to_good(&store, &selection).expect("first");
    let once = store.read_working_set().expect("read");
    let second = switch_to_good(&store, &selection).expect("second");
    assert_eq!(second.changed, 0);
    assert_eq!(store.read_working_set().expect("read"), once);
}

#[test]
fn out_of_range_selection_leaves_working_set_untouched() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = write_selection(dir.path(), "sel.txt", "0\n3\n");
    let err = switch_to_good(&store, &selection).expect_err("index 3 is out of range");
    assert_eq!(err.code(), "selection.out_of_range");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("3"));
    assert_eq!(store.read_working_set().expect("read"), vec![5, 1, 7]);

    let negative = write_selection(dir.path(), "neg.txt", "-1\n");
    assert!(switch_to_bad(&store, &negative).is_err());
}

#[test]
fn duplicate_indices_collapse() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = write_selection(dir.path(), "sel.txt", "2\n2\n2\n");
    let outcome = switch_to_good(&store, &selection).expect("switch");
    assert_eq!(outcome.requested, 3);
    assert_eq!(outcome.distinct, 1);
    assert_eq!(store.read_working_set().expect("read"), vec![5, 1, 0]);
}

#[test]
fn malformed_working_set_is_fatal() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\nseven\n7\n");
    let selection = write_selection(dir.path(), "sel.txt", "0\n");
    let err = switch_to_good(&store, &selection).expect_err("parse failure");
    assert_eq!(err.code(), "store.parse");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("2"));
}

#[test]
fn diverged_files_are_rejected() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n");
    assert_eq!(
        store.load_session().expect_err("length").code(),
        "store.length_mismatch"
    );

    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n2\n7\n");
    assert_eq!(
        store.load_session().expect_err("diverged").code(),
        "store.entry_diverged"
    );
}

#[test]
fn switch_tmp_clears_and_records_selection() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    assert!(store.last_tmp().expect("no marker").is_none());
    let selection = write_selection(dir.path(), "step_3.txt", "0\n1\n");
    switch_tmp(&store, &selection).expect("switch tmp");
    assert_eq!(store.read_working_set().expect("read"), vec![0, 0, 7]);
    assert_eq!(store.last_tmp().expect("marker"), Some(selection));
}

#[test]
fn blank_lines_are_rejected_but_final_newline_is_optional() {
    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n\n1\n7\n");
    let err = store.read_working_set().expect_err("blank line");
    assert_eq!(err.code(), "store.parse");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("2"));

    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = write_selection(dir.path(), "sel.txt", "\n\n1\n");
    let err = switch_to_good(&store, &selection).expect_err("blank selection lines");
    assert_eq!(err.code(), "store.parse");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("1"));
    assert_eq!(store.read_working_set().expect("read"), vec![5, 1, 7]);

    let store = seed_session(dir.path(), "5\n1\n7", "5\n1\n7\n");
    assert_eq!(store.read_objects_file().expect("objects"), vec![5, 1, 7]);
    assert_eq!(store.read_working_set().expect("working"), vec![5, 1, 7]);
}

#[cfg(unix)]
#[test]
fn switch_tmp_records_non_utf8_selection_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().expect("tmp");
    let store = seed_session(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = dir.path().join(OsStr::from_bytes(b"step\xff.txt"));
    if fs::write(&selection, "1\n").is_err() {
        // Some filesystems refuse names that are not valid UTF-8.
        return;
    }
    switch_tmp(&store, &selection).expect("switch tmp");
    assert_eq!(store.read_working_set().expect("read"), vec![5, 0, 7]);
    assert_eq!(store.last_tmp().expect("marker"), Some(selection));
}
