//! End-to-end runs of the `graphemer` binary over stdin.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_graphemer"))
        .args(args)
        .env_remove("GRAPHEMER_FORMAT")
        .env_remove("GRAPHEMER_ENCODING")
        .env_remove("GRAPHEMER_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn graphemer");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input)
        .expect("write stdin");
    child.wait_with_output().expect("wait for graphemer")
}

#[test]
fn plain_output_from_stdin() {
    let out = run(&[], "e\u{301}\u{1F1EF}\u{1F1F5}!".as_bytes());
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "e\u{301}|\u{1F1EF}\u{1F1F5}|!\n"
    );
}

#[test]
fn count_utf16le() {
    let bytes: Vec<u8> = "a\r\n\u{1F469}\u{200D}\u{1F4BB}"
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    let out = run(&["-e", "utf16le", "-f", "count"], &bytes);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "3\n");
}

#[test]
fn format_from_environment() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_graphemer"))
        .env("GRAPHEMER_FORMAT", "count")
        .env_remove("GRAPHEMER_ENCODING")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn graphemer");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(b"abc")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait for graphemer");
    assert_eq!(String::from_utf8_lossy(&out.stdout), "3\n");
}

#[test]
fn invalid_utf8_fails_with_status_one() {
    let out = run(&[], &[b'a', 0xFF]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not valid UTF-8"), "stderr: {stderr}");
}

#[test]
fn odd_utf16_fails() {
    let out = run(&["--encoding", "utf16be"], &[0x00, 0x61, 0x00]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("odd number of bytes"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let out = run(&["-vv", "-f", "count"], b"ab");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "2\n");
    assert!(String::from_utf8_lossy(&out.stderr).contains("segmenting input"));
}
