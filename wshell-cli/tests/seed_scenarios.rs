// This file is part of wshell, a POSIX-flavored command shell.
// Copyright (C) 2026 wshell contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! End-to-end scenarios driven against the built `wshell` binary

use std::env;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_wshell");

fn run_command(script: &str) -> std::process::Output {
    Command::new(BIN)
        .env_remove("HOME")
        .arg("-c")
        .arg(script)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run wshell")
}

#[test]
fn echo_with_two_plain_words() {
    let output = run_command("echo hello world");
    assert!(output.status.success());
}

#[test]
fn echo_with_a_quoted_argument() {
    let output = run_command(r#"echo "hello world""#);
    assert!(output.status.success());
}

#[test]
fn redirected_cat_round_trips_through_a_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output_path = dir.path().join("out.txt");
    std::fs::write(&input, "payload\n").unwrap();

    let script = format!(
        "cat < {} > {}",
        input.to_str().unwrap(),
        output_path.to_str().unwrap()
    );
    let output = run_command(&script);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "payload\n");
}

#[test]
fn a_three_stage_pipeline_runs_to_completion() {
    let output = run_command("echo foo | grep foo | sort");
    assert!(output.status.success());
}

#[test]
fn a_sequence_with_a_trailing_semicolon_runs_both_commands() {
    let output = run_command("echo one; echo two;");
    assert!(output.status.success());
}

#[test]
fn an_assignment_is_visible_to_the_next_commands_expansion() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let script = format!("let X = 42; echo $X > {}", out.to_str().unwrap());
    let output = run_command(&script);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read_to_string(&out).unwrap().trim(), "42");
}

#[test]
fn a_comment_only_line_runs_nothing_and_succeeds() {
    let output = run_command("# comment only");
    assert!(output.status.success());
}

#[test]
fn a_leading_pipe_is_a_parse_error_with_nonzero_exit() {
    let output = run_command("| grep foo");
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

#[test]
fn a_script_file_with_a_leading_pipe_fails_with_a_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.wsh");
    std::fs::write(&path, "| grep foo\n").unwrap();
    let output = Command::new(BIN)
        .env_remove("HOME")
        .arg(path.to_str().unwrap())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn a_script_file_runs_multiple_statements_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let script = dir.path().join("script.wsh");
    std::fs::write(
        &script,
        format!("echo one > {}\necho two >> {}\n", out.to_str().unwrap(), out.to_str().unwrap()),
    )
    .unwrap();
    let output = Command::new(BIN)
        .env_remove("HOME")
        .arg(script.to_str().unwrap())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "one\ntwo\n");
}
