use std::io::Write;
use std::process::{Command, Output, Stdio};

fn tessa(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tessa"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tessa");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn square_from_stdin() {
    let out = tessa(&["--free-for", "all"], "POLYGON((0 0,4 0,4 4,0 4,0 0))");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("4\n4\n"));
    assert!(stdout.contains("0;1;16.0000000;all;1;boundary;\n"));
}

#[test]
fn parse_failure_exits_with_two() {
    let out = tessa(&[], "POLYGON((0 0,4 0,4 4 0 4,0 0))");
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("[error]"));
    assert!(stderr.contains('^'));
}

#[test]
fn missing_file_exits_with_one() {
    let out = tessa(&["-f", "/nonexistent/tessa-input.wkt"], "");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.txt");
    let path_arg = path.to_str().unwrap();
    let out = tessa(
        &["--cdt", "-o", path_arg],
        "POLYGON((0 0,4 0,4 4,0 4,0 0))",
    );
    assert!(out.status.success());
    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("4"));
    assert_eq!(lines.next(), Some("5"));
}

#[test]
fn parse_failure_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.txt");
    let out = tessa(&["-o", path.to_str().unwrap()], "POLYGON((0 0,1 0,1 1 0 0))");
    assert_eq!(out.status.code(), Some(2));
    assert!(!path.exists());
}
