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

//! The real process-launching [`ExecutionBackend`]
//!
//! This is the "external collaborator" the interpreter's own crate only
//! defines the contract for. It shells out via [`std::process::Command`];
//! fork/exec and `CreateProcess` themselves are not this binary's concern,
//! std::process already owns that distinction per platform.

use std::fs;
use std::process::{Command, Stdio};

use wshell_env::io::output::OpenMode;
use wshell_semantics::backend::{
    EnvironmentPolicy, ExecutionBackend, ExecutionRequest, ExecutionResult, StreamEndpoint,
};

/// Launches real child processes with [`std::process::Command`].
#[derive(Default)]
pub struct ProcessBackend;

impl ProcessBackend {
    #[must_use]
    pub fn new() -> Self {
        ProcessBackend
    }
}

impl ExecutionBackend for ProcessBackend {
    fn execute_command(&mut self, request: &ExecutionRequest) -> ExecutionResult {
        let mut command = Command::new(&request.program);
        command.args(&request.args);

        if let Some(dir) = &request.working_dir {
            command.current_dir(dir);
        }

        match &request.environment {
            EnvironmentPolicy::Inherit => {}
            EnvironmentPolicy::InheritAndOverlay(overlay) => {
                command.envs(overlay);
            }
            EnvironmentPolicy::Replace(env) => {
                command.env_clear();
                command.envs(env);
            }
        }

        let stdin_result = apply_stdin(&mut command, &request.stdin);
        if let Err(message) = stdin_result {
            return ExecutionResult::failure(126, message);
        }
        apply_output(&mut command, &request.stdout, |c, s| {
            c.stdout(s);
        });
        apply_output(&mut command, &request.stderr, |c, s| {
            c.stderr(s);
        });

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return ExecutionResult::failure(127, e.to_string()),
        };

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => return ExecutionResult::failure(126, e.to_string()),
        };

        let mut result = ExecutionResult {
            exit_code: exit_code_of(&output.status),
            error_message: None,
            captured_stdout: None,
            captured_stderr: None,
        };
        if matches!(request.stdout, StreamEndpoint::Capture) {
            result.captured_stdout = Some(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        if matches!(request.stderr, StreamEndpoint::Capture) {
            result.captured_stderr = Some(String::from_utf8_lossy(&output.stderr).into_owned());
        }
        result
    }
}

fn apply_stdin(command: &mut Command, endpoint: &StreamEndpoint) -> Result<(), String> {
    match endpoint {
        StreamEndpoint::Inherit => {
            command.stdin(Stdio::inherit());
        }
        StreamEndpoint::Null => {
            command.stdin(Stdio::null());
        }
        StreamEndpoint::Capture => {
            command.stdin(Stdio::piped());
        }
        StreamEndpoint::File(path, _mode) => {
            let file =
                fs::File::open(path).map_err(|e| format!("{}: {e}", path.to_string_lossy()))?;
            command.stdin(Stdio::from(file));
        }
    }
    Ok(())
}

fn apply_output(command: &mut Command, endpoint: &StreamEndpoint, set: impl Fn(&mut Command, Stdio)) {
    match endpoint {
        StreamEndpoint::Inherit => set(command, Stdio::inherit()),
        StreamEndpoint::Null => set(command, Stdio::null()),
        StreamEndpoint::Capture => set(command, Stdio::piped()),
        StreamEndpoint::File(path, mode) => {
            let opened = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(*mode == OpenMode::Append)
                .truncate(*mode == OpenMode::Truncate)
                .open(path);
            match opened {
                Ok(file) => set(command, Stdio::from(file)),
                Err(_) => set(command, Stdio::null()),
            }
        }
    }
}

fn exit_code_of(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
