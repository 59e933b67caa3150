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

//! Entry point: parses argv, loads the RC file, and dispatches to one of
//! the three session modes

mod args;
mod process_backend;
mod repl;

use std::io;

use wshell_env::{config, History, Policy, VariableStore};
use wshell_semantics::Interpreter;

use args::Source;
use process_backend::ProcessBackend;

fn main() {
    let run = match args::parse(std::env::args().skip(1)) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("wshell: {e}");
            std::process::exit(2);
        }
    };

    let policy = Policy::default();
    let mut variables = VariableStore::new(policy);
    load_rc_file(&mut variables, policy);

    let history = History::default();
    let backend = ProcessBackend::new();
    let stdout = Box::new(wshell_env::io::output::StreamOutput::new(
        Box::new(io::stdout()),
        "<stdout>",
    ));
    let stderr = Box::new(wshell_env::io::output::StreamOutput::new(
        Box::new(io::stderr()),
        "<stderr>",
    ));
    let mut interp = Interpreter::new(variables, history, backend, stdout, stderr);

    let code = match run.source {
        Source::Stdin => {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            repl::run_interactive(&mut interp, &mut lock, &mut io::stderr())
        }
        Source::Command(command) => repl::run_command(&mut interp, &command, policy),
        Source::File(path) => repl::run_script(&mut interp, &path, policy),
    };

    std::process::exit(code);
}

/// Loads the user's RC file, if one exists, merging it into `variables`.
/// A missing file is not an error; a file that exists but fails to parse
/// is reported on stderr and the session's own variables are left as-is.
fn load_rc_file(variables: &mut VariableStore, policy: Policy) {
    let Some(path) = config::default_rc_path() else {
        return;
    };
    if !path.exists() {
        return;
    }
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("wshell: {}: {e}", path.display());
            return;
        }
    };
    match config::parse(&content, &path.to_string_lossy(), &policy) {
        Ok(rc_store) => {
            if let Err(e) = variables.merge(&rc_store) {
                eprintln!("wshell: {e}");
            }
        }
        Err(e) => eprintln!("wshell: {e}"),
    }
}
