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

//! The three ways a session can run: interactively, from a script file,
//! or from a single `-c COMMAND` string

use std::io::{self, BufRead, Write as _};

use wshell_env::io::input::{FileInput, InputError, InputSource, StringInput};
use wshell_env::{Policy, Source};
use wshell_semantics::backend::ExecutionBackend;
use wshell_semantics::interpreter::{Interpreter, EXIT_SUCCESS};
use wshell_syntax::ast::Statement;
use wshell_syntax::{parse_line, parse_program};

/// Exit code used when script-mode parsing fails.
pub const PARSE_FAILURE_EXIT_CODE: i32 = 2;

/// True when `program` is exactly a standalone `exit` command, per the
/// external interface's special casing of `exit`.
fn is_exit_command(statements: &[Statement]) -> bool {
    matches!(
        statements,
        [Statement::Command(cmd)] if cmd.name.text == "exit"
    )
}

/// Runs an interactive read-eval-print loop over `input`, prompting on
/// `prompt_out`. Returns the exit code of the session.
pub fn run_interactive<B: ExecutionBackend>(
    interp: &mut Interpreter<B>,
    input: &mut dyn BufRead,
    prompt_out: &mut dyn io::Write,
) -> i32 {
    let mut last_exit = EXIT_SUCCESS;
    loop {
        let _ = write!(prompt_out, "$ ");
        let _ = prompt_out.flush();

        let mut buffer = String::new();
        match read_one_line(input, &mut buffer) {
            Eof::Reached => break,
            Eof::NotYet => {}
        }
        if buffer.trim().is_empty() {
            continue;
        }

        loop {
            match parse_line(&buffer, Source::Stream("<stdin>".to_owned())) {
                Ok(program) => {
                    if is_exit_command(&program.statements) {
                        return EXIT_SUCCESS;
                    }
                    interp.history_mut().push(buffer.trim_end_matches('\n').to_owned());
                    last_exit = interp.execute_program(&program);
                    break;
                }
                Err(e) if e.is_incomplete() => {
                    let _ = write!(prompt_out, "> ");
                    let _ = prompt_out.flush();
                    let mut continuation = String::new();
                    if let Eof::Reached = read_one_line(input, &mut continuation) {
                        break;
                    }
                    buffer.push_str(&continuation);
                }
                Err(e) => {
                    let _ = writeln!(io::stderr(), "{e}");
                    break;
                }
            }
        }
    }
    last_exit
}

enum Eof {
    Reached,
    NotYet,
}

fn read_one_line(input: &mut dyn BufRead, buffer: &mut String) -> Eof {
    match input.read_line(buffer) {
        Ok(0) => Eof::Reached,
        Ok(_) => {
            if !buffer.ends_with('\n') {
                buffer.push('\n');
            }
            Eof::NotYet
        }
        Err(_) => Eof::Reached,
    }
}

/// Runs a script file to completion. A parse error terminates the script
/// immediately with [`PARSE_FAILURE_EXIT_CODE`].
pub fn run_script<B: ExecutionBackend>(
    interp: &mut Interpreter<B>,
    path: &str,
    policy: Policy,
) -> i32 {
    let mut source = match FileInput::open(path, policy) {
        Ok(source) => source,
        Err(e) => {
            report_input_error(&e);
            return PARSE_FAILURE_EXIT_CODE;
        }
    };
    let content = match source.read() {
        Ok(content) => content,
        Err(e) => {
            report_input_error(&e);
            return PARSE_FAILURE_EXIT_CODE;
        }
    };
    match parse_program(&content, Source::File(path.to_owned())) {
        Ok(program) => {
            if is_exit_command(&program.statements) {
                return EXIT_SUCCESS;
            }
            interp.execute_program(&program)
        }
        Err(e) => {
            let _ = writeln!(io::stderr(), "{e}");
            PARSE_FAILURE_EXIT_CODE
        }
    }
}

/// Runs a single `-c COMMAND` string.
pub fn run_command<B: ExecutionBackend>(
    interp: &mut Interpreter<B>,
    command: &str,
    policy: Policy,
) -> i32 {
    let mut source = StringInput::new(command, "<command-line>", policy);
    let content = match source.read() {
        Ok(content) => content,
        Err(e) => {
            report_input_error(&e);
            return PARSE_FAILURE_EXIT_CODE;
        }
    };
    match parse_program(&content, Source::String) {
        Ok(program) => {
            if is_exit_command(&program.statements) {
                return EXIT_SUCCESS;
            }
            interp.execute_program(&program)
        }
        Err(e) => {
            let _ = writeln!(io::stderr(), "{e}");
            PARSE_FAILURE_EXIT_CODE
        }
    }
}

fn report_input_error(e: &InputError) {
    let _ = writeln!(io::stderr(), "{e}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wshell_env::{History, VariableStore};
    use wshell_semantics::backend::RecordingBackend;
    use wshell_env::io::output::StringOutput;

    fn interp() -> Interpreter<RecordingBackend> {
        Interpreter::new(
            VariableStore::new(Policy::default()),
            History::default(),
            RecordingBackend::new(),
            Box::new(StringOutput::new()),
            Box::new(StringOutput::new()),
        )
    }

    #[test]
    fn interactive_session_stops_on_exit() {
        let mut i = interp();
        let mut input = io::Cursor::new(b"echo hi\nexit\necho never\n".to_vec());
        let mut prompt = Vec::new();
        let code = run_interactive(&mut i, &mut input, &mut prompt);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(i.backend().calls.len(), 1);
    }

    #[test]
    fn interactive_session_stops_at_eof_without_exit() {
        let mut i = interp();
        let mut input = io::Cursor::new(b"echo hi\n".to_vec());
        let mut prompt = Vec::new();
        run_interactive(&mut i, &mut input, &mut prompt);
        assert_eq!(i.backend().calls.len(), 1);
    }

    #[test]
    fn interactive_session_records_history() {
        let mut i = interp();
        let mut input = io::Cursor::new(b"echo hi\necho bye\n".to_vec());
        let mut prompt = Vec::new();
        run_interactive(&mut i, &mut input, &mut prompt);
        assert_eq!(i.history().items().collect::<Vec<_>>(), vec!["echo hi", "echo bye"]);
    }

    #[test]
    fn interactive_session_continues_reading_on_incomplete_input() {
        let mut i = interp();
        let mut input = io::Cursor::new(b"echo hi |\ngrep x\n".to_vec());
        let mut prompt = Vec::new();
        run_interactive(&mut i, &mut input, &mut prompt);
        assert_eq!(i.backend().calls.len(), 2);
    }

    #[test]
    fn run_command_executes_a_single_line() {
        let mut i = interp();
        let code = run_command(&mut i, "echo hi", Policy::default());
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(i.backend().calls.len(), 1);
    }

    #[test]
    fn run_command_with_exit_returns_success_without_running_backend() {
        let mut i = interp();
        let code = run_command(&mut i, "exit", Policy::default());
        assert_eq!(code, EXIT_SUCCESS);
        assert!(i.backend().calls.is_empty());
    }

    #[test]
    fn run_script_reports_parse_failure() {
        let mut i = interp();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wsh");
        std::fs::write(&path, "| grep foo\n").unwrap();
        let code = run_script(&mut i, path.to_str().unwrap(), Policy::default());
        assert_eq!(code, PARSE_FAILURE_EXIT_CODE);
    }

    #[test]
    fn run_script_executes_a_valid_script() {
        let mut i = interp();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.wsh");
        std::fs::write(&path, "echo one\necho two\n").unwrap();
        let code = run_script(&mut i, path.to_str().unwrap(), Policy::default());
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(i.backend().calls.len(), 2);
    }
}
