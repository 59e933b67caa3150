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

//! The contract the interpreter expects from whatever actually launches
//! programs
//!
//! This crate defines the contract only. A process-spawning implementation
//! lives with the host binary; this module also ships [`RecordingBackend`],
//! a backend that launches nothing and is used by the interpreter's own
//! tests.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use wshell_env::io::output::OpenMode;

/// Where a child's environment comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnvironmentPolicy {
    /// Inherit the host process's environment unchanged.
    Inherit,
    /// Inherit, then apply the given overlay on top.
    InheritAndOverlay(HashMap<String, String>),
    /// Use exactly the given map, ignoring the host's environment.
    Replace(HashMap<String, String>),
}

/// Where one of a command's standard streams connects.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StreamEndpoint {
    /// Connects to the host's corresponding stream.
    Inherit,
    /// Connects to a file, opened in the given mode.
    File(PathBuf, OpenMode),
    /// Discards (for stdout/stderr) or yields EOF immediately (for stdin).
    Null,
    /// Collected in memory and returned on [`ExecutionResult`].
    Capture,
}

/// A single command ready to hand to a backend.
///
/// All expansion (§4.I) has already happened by the time a request is
/// built; the backend never sees an unexpanded `$VAR`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionRequest {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub environment: EnvironmentPolicy,
    pub stdin: StreamEndpoint,
    pub stdout: StreamEndpoint,
    pub stderr: StreamEndpoint,
}

impl ExecutionRequest {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        ExecutionRequest {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            environment: EnvironmentPolicy::Inherit,
            stdin: StreamEndpoint::Inherit,
            stdout: StreamEndpoint::Inherit,
            stderr: StreamEndpoint::Inherit,
        }
    }
}

/// The outcome of one backend call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub error_message: Option<String>,
    /// Populated when the corresponding stream's endpoint was `Capture`.
    pub captured_stdout: Option<String>,
    pub captured_stderr: Option<String>,
}

impl ExecutionResult {
    #[must_use]
    pub fn success() -> Self {
        ExecutionResult::default()
    }

    #[must_use]
    pub fn failure(exit_code: i32, message: impl Into<String>) -> Self {
        ExecutionResult {
            exit_code,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// External collaborator that actually launches and waits for programs.
///
/// The interpreter never spawns a process itself; it builds an
/// [`ExecutionRequest`] and hands it to whatever implements this trait.
pub trait ExecutionBackend {
    fn execute_command(&mut self, request: &ExecutionRequest) -> ExecutionResult;

    /// Runs a pipeline. The default synthesizes it as a left-to-right
    /// sequence of [`execute_command`](Self::execute_command) calls and
    /// reports the last one's result, matching the core's scope: true
    /// pipe wiring between stages is a backend concern.
    fn execute_pipeline(&mut self, requests: &[ExecutionRequest]) -> ExecutionResult {
        let mut result = ExecutionResult::success();
        for request in requests {
            result = self.execute_command(request);
        }
        result
    }

    /// Interactive setup (terminal process groups, signal dispositions).
    /// A no-op is a valid implementation.
    fn init_job_control(&mut self) {}
}

/// A backend that launches nothing; it records every request it receives
/// and replays a queue of canned results.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<ExecutionRequest>,
    responses: VecDeque<ExecutionResult>,
    default_result: ExecutionResult,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        RecordingBackend::default()
    }

    /// Queues a result to return from the next call. Calls beyond the
    /// queued responses return `default_result` (success, by default).
    pub fn push_response(&mut self, result: ExecutionResult) {
        self.responses.push_back(result);
    }

    pub fn set_default_result(&mut self, result: ExecutionResult) {
        self.default_result = result;
    }
}

impl ExecutionBackend for RecordingBackend {
    fn execute_command(&mut self, request: &ExecutionRequest) -> ExecutionResult {
        self.calls.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| self.default_result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_replays_queued_responses_in_order() {
        let mut backend = RecordingBackend::new();
        backend.push_response(ExecutionResult::failure(1, "boom"));
        backend.push_response(ExecutionResult::success());

        let request = ExecutionRequest::new("echo");
        let first = backend.execute_command(&request);
        let second = backend.execute_command(&request);

        assert_eq!(first.exit_code, 1);
        assert_eq!(second.exit_code, 0);
        assert_eq!(backend.calls.len(), 2);
    }

    #[test]
    fn recording_backend_falls_back_to_default_result() {
        let mut backend = RecordingBackend::new();
        backend.set_default_result(ExecutionResult::failure(42, "no more canned responses"));
        let result = backend.execute_command(&ExecutionRequest::new("ls"));
        assert_eq!(result.exit_code, 42);
    }

    #[test]
    fn default_pipeline_execution_runs_sequentially_and_returns_last_result() {
        let mut backend = RecordingBackend::new();
        backend.push_response(ExecutionResult::failure(1, "first fails"));
        backend.push_response(ExecutionResult::success());
        let result = backend.execute_pipeline(&[
            ExecutionRequest::new("false"),
            ExecutionRequest::new("true"),
        ]);
        assert_eq!(result.exit_code, 0);
        assert_eq!(backend.calls.len(), 2);
    }
}
