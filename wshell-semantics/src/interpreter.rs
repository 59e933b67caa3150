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

//! Walks a [`Program`] against a variable map, a history ring, and an
//! [`ExecutionBackend`]

use std::path::PathBuf;

use wshell_env::expand::expand;
use wshell_env::io::output::{OpenMode, OutputDestination};
use wshell_env::{History, VariableStore};
use wshell_syntax::ast::{Command, Pipeline, Program, RedirKind, Sequence, Statement};

use crate::backend::{ExecutionBackend, ExecutionRequest, StreamEndpoint};
use crate::diagnostic::{Diagnostic, CONSTRUCTION_FAILURE_EXIT_CODE};

/// Success exit code, by POSIX convention.
pub const EXIT_SUCCESS: i32 = 0;

/// Owns session state and drives execution of parsed statements.
pub struct Interpreter<B: ExecutionBackend> {
    variables: VariableStore,
    history: History,
    backend: B,
    stdout: Box<dyn OutputDestination>,
    stderr: Box<dyn OutputDestination>,
}

impl<B: ExecutionBackend> Interpreter<B> {
    #[must_use]
    pub fn new(
        variables: VariableStore,
        history: History,
        backend: B,
        stdout: Box<dyn OutputDestination>,
        stderr: Box<dyn OutputDestination>,
    ) -> Self {
        Interpreter {
            variables,
            history,
            backend,
            stdout,
            stderr,
        }
    }

    #[must_use]
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn stdout_mut(&mut self) -> &mut dyn OutputDestination {
        self.stdout.as_mut()
    }

    pub fn stderr_mut(&mut self) -> &mut dyn OutputDestination {
        self.stderr.as_mut()
    }

    /// Runs every statement in `program` in order. A statement that fails
    /// writes a diagnostic to stderr and the session keeps going; the
    /// returned code is that of the last statement run, falling back to
    /// [`CONSTRUCTION_FAILURE_EXIT_CODE`] for a statement that failed.
    pub fn execute_program(&mut self, program: &Program) -> i32 {
        let mut last_exit = EXIT_SUCCESS;
        for statement in &program.statements {
            match self.execute_statement(statement) {
                Ok(code) => last_exit = code,
                Err(diagnostic) => {
                    last_exit = CONSTRUCTION_FAILURE_EXIT_CODE;
                    let _ = self.stderr.write(format!("{diagnostic}\n").as_bytes());
                    let _ = self.stderr.flush();
                }
            }
        }
        last_exit
    }

    pub fn execute_statement(&mut self, statement: &Statement) -> Result<i32, Diagnostic> {
        match statement {
            Statement::Comment(_) => Ok(EXIT_SUCCESS),
            Statement::Assignment(assignment) => {
                self.variables
                    .set(&assignment.name, &assignment.value)
                    .map_err(|e| Diagnostic::plain(e.to_string()))?;
                Ok(EXIT_SUCCESS)
            }
            Statement::Command(command) => self.execute_command(command),
            Statement::Pipeline(pipeline) => self.execute_pipeline(pipeline),
            Statement::Sequence(sequence) => self.execute_sequence(sequence),
        }
    }

    fn execute_command(&mut self, command: &Command) -> Result<i32, Diagnostic> {
        let request = self.build_request(command)?;
        let result = self.backend.execute_command(&request);
        match result.error_message {
            Some(message) => Err(Diagnostic::execution(&request.program, Some(&message))),
            None => Ok(result.exit_code),
        }
    }

    fn execute_pipeline(&mut self, pipeline: &Pipeline) -> Result<i32, Diagnostic> {
        let mut requests = Vec::with_capacity(pipeline.commands.len());
        for command in &pipeline.commands {
            requests.push(self.build_request(command)?);
        }
        let last_program = requests.last().map(|r| r.program.clone()).unwrap_or_default();
        let result = self.backend.execute_pipeline(&requests);
        match result.error_message {
            Some(message) => Err(Diagnostic::execution(&last_program, Some(&message))),
            None => Ok(result.exit_code),
        }
    }

    fn execute_sequence(&mut self, sequence: &Sequence) -> Result<i32, Diagnostic> {
        let mut last_exit = EXIT_SUCCESS;
        for statement in &sequence.statements {
            last_exit = self.execute_statement(statement)?;
        }
        Ok(last_exit)
    }

    fn build_request(&self, command: &Command) -> Result<ExecutionRequest, Diagnostic> {
        let program = expand(&command.name.text, &self.variables);
        if program.is_empty() {
            return Err(Diagnostic::plain(
                "command name expanded to the empty string",
            ));
        }

        let mut request = ExecutionRequest::new(program);
        request.args = command
            .args
            .iter()
            .map(|word| expand(&word.text, &self.variables))
            .collect();

        for redirection in &command.redirs {
            let target = PathBuf::from(expand(&redirection.target.text, &self.variables));
            match redirection.kind {
                RedirKind::Input => {
                    // Mode is meaningless for a read-only stream; Truncate
                    // is an arbitrary placeholder the backend must ignore.
                    request.stdin = StreamEndpoint::File(target, OpenMode::Truncate);
                }
                RedirKind::OutputTruncate => {
                    request.stdout = StreamEndpoint::File(target, OpenMode::Truncate);
                }
                RedirKind::OutputAppend => {
                    request.stdout = StreamEndpoint::File(target, OpenMode::Append);
                }
            }
        }

        Ok(request)
    }
}
