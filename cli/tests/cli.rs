//! End-to-end runs of the `stdcheck` binary.

use std::process::{Command, Output};

fn stdcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stdcheck"))
        .args(args)
        .env("STDCHECK_SUMMARY", "false")
        .env_remove("STDCHECK_INDENT")
        .output()
        .expect("failed to spawn stdcheck")
}

fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Lines the built-in tests print while their output is captured.
const TEST_OUTPUT: &[&str] = &[
    "Hello world",
    "result: 42",
    "warning: approximated",
    "progress: 50%",
];

fn assert_all_passed(json: &str) {
    let json: serde_json::Value = serde_json::from_str(json).unwrap();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 5);
    for r in results {
        assert_eq!(r["pass"], true, "{}", r);
    }
}

#[test]
fn prints_json_to_stdout_without_dest() {
    let cases: [&[&str]; 2] = [&[], &["label"]];
    for args in cases {
        let out = stdcheck(args);
        assert_eq!(out.status.code(), Some(0));

        let json: serde_json::Value = serde_json::from_str(&stdout_of(&out)).unwrap();
        let results = json.as_array().unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0]["name"], "hello_world");
        for r in results {
            assert_eq!(r["pass"], true);
            assert_eq!(r["reason"], "");
        }
    }
}

#[test]
fn uses_four_space_indent() {
    let out = stdcheck(&[]);
    assert!(stdout_of(&out).starts_with("[\n    {\n        \"name\": \"hello_world\","));
}

#[test]
fn writes_json_file_with_dest() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("results.json");
    let out = stdcheck(&["label", dest.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout_of(&out).trim_end(),
        format!("Wrote test results to {}", dest.to_string_lossy())
    );
    let written = std::fs::read_to_string(&dest).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[test]
fn help_and_extra_args_print_usage() {
    let cases: [&[&str]; 2] = [&["label", "-h"], &["a", "b", "c"]];
    for args in cases {
        let out = stdcheck(args);
        assert_eq!(out.status.code(), Some(1));
        assert_eq!(stdout_of(&out).trim_end(), "Usage: stdcheck [label] [destfile]");
    }
}

#[test]
fn unwritable_dest_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdcheck(&["label", dir.path().to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to save test results"));
}

#[test]
fn invalid_config_fails_before_running() {
    let out = Command::new(env!("CARGO_BIN_EXE_stdcheck"))
        .env("STDCHECK_INDENT", "wide")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn version_flag_is_a_label() {
    for flag in ["--version", "-V"] {
        let out = stdcheck(&[flag]);
        assert_eq!(out.status.code(), Some(0));
        assert_all_passed(&stdout_of(&out));
    }
}

#[test]
fn captured_output_never_reaches_process_streams() {
    let out = stdcheck(&[]);
    assert_eq!(out.status.code(), Some(0));

    // stdout is exactly the JSON report, printed after the streams were restored.
    assert_all_passed(&stdout_of(&out));
    let stderr = stderr_of(&out);
    for line in TEST_OUTPUT {
        assert!(!stderr.contains(line), "leaked {:?}: {}", line, stderr);
    }
}

#[test]
fn writes_after_the_run_reach_stdout_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("results.json");
    let out = Command::new(env!("CARGO_BIN_EXE_stdcheck"))
        .args(["label", dest.to_str().unwrap()])
        .env("STDCHECK_SUMMARY", "true")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));

    let stdout = stdout_of(&out);
    assert!(stdout.starts_with("Wrote test results to "), "{}", stdout);
    let stderr = stderr_of(&out);
    assert!(stderr.contains("All 5 tests passed"), "{}", stderr);
    for line in TEST_OUTPUT {
        assert!(!stdout.contains(line) && !stderr.contains(line));
    }
    assert_all_passed(&std::fs::read_to_string(&dest).unwrap());
}
