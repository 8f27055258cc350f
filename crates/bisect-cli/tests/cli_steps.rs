use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn harness(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bisect-harness"))
        .arg("--work-dir")
        .arg(work_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run bisect-harness")
}

fn seed(dir: &Path, objects: &str, working: &str) {
    fs::write(dir.join("objects.txt"), objects).expect("objects");
    fs::write(dir.join("working_set.txt"), working).expect("working set");
}

#[test]
fn full_step_sequence_follows_the_state_machine() {
    let dir = tempdir().expect("tmp");
    seed(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = dir.path().join("sel.txt");
    fs::write(&selection, "1\n").expect("selection");
    let selection = selection.to_str().expect("utf8 path");

    let unprepared = harness(dir.path(), &["is-good"]);
    assert_eq!(unprepared.status.code(), Some(1));

    assert!(harness(dir.path(), &["setup"]).status.success());
    assert!(dir.path().join("is_setup").exists());
    assert_eq!(harness(dir.path(), &["is-good"]).status.code(), Some(1));

    assert!(harness(dir.path(), &["switch-to-good", selection]).status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("working_set.txt")).expect("read"),
        "5\n0\n7\n"
    );
    assert_eq!(harness(dir.path(), &["is-good"]).status.code(), Some(0));

    assert!(harness(dir.path(), &["switch-to-bad", selection]).status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("working_set.txt")).expect("read"),
        "5\n1\n7\n"
    );
}

#[test]
fn switch_tmp_writes_the_marker_file() {
    let dir = tempdir().expect("tmp");
    seed(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = dir.path().join("step.txt");
    fs::write(&selection, "0\n").expect("selection");
    let output = harness(
        dir.path(),
        &["switch-tmp", selection.to_str().expect("utf8 path")],
    );
    assert!(output.status.success());
    let marker = fs::read_to_string(dir.path().join("tmp_file")).expect("marker");
    assert_eq!(marker.trim(), selection.display().to_string());
}

#[test]
fn setup_bad_exits_one_and_errors_exit_two() {
    let dir = tempdir().expect("tmp");
    assert_eq!(harness(dir.path(), &["setup-bad"]).status.code(), Some(1));
    assert!(!dir.path().join("is_setup").exists());

    seed(dir.path(), "5\n1\n7\n", "5\n1\n7\n");
    let selection = dir.path().join("sel.txt");
    fs::write(&selection, "9\n").expect("selection");
    let output = harness(
        dir.path(),
        &["switch-to-good", selection.to_str().expect("utf8 path")],
    );
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("selection.out_of_range"));
}

#[test]
fn generated_session_can_be_bisected() {
    let dir = tempdir().expect("tmp");
    let generated = harness(
        dir.path(),
        &["gen-obj", "--num-objects", "40", "--num-bad", "3", "--seed", "5"],
    );
    assert!(generated.status.success());

    let listed = harness(dir.path(), &["gen-init-list"]);
    assert!(listed.status.success());
    let items: Vec<String> = String::from_utf8(listed.stdout)
        .expect("utf8")
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(items.len(), 40);
    assert_eq!(items.first().map(String::as_str), Some("0"));

    let output = harness(dir.path(), &["bisect"]);
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    let bad = report["bad_indices"].as_array().expect("indices");
    assert_eq!(bad.len(), 3);
    assert_eq!(report["object_count"], 40);
}

#[test]
fn config_file_overrides_layout() {
    let dir = tempdir().expect("tmp");
    fs::write(dir.path().join("objs.lst"), "2\n9\n").expect("objects");
    fs::write(dir.path().join("ws.lst"), "2\n9\n").expect("working");
    let config = dir.path().join("harness.yaml");
    fs::write(
        &config,
        "objects_file: objs.lst\nworking_set_file: ws.lst\nbad_marker: 9\n",
    )
    .expect("config");
    let config = config.to_str().expect("utf8 path");

    assert!(harness(dir.path(), &["--config", config, "setup"]).status.success());
    assert_eq!(
        harness(dir.path(), &["--config", config, "is-good"]).status.code(),
        Some(1)
    );
}
