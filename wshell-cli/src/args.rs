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

//! Command-line argument parsing
//!
//! The surface is deliberately small: `-c COMMAND`, a script path, or
//! nothing (read the session interactively from stdin).

use std::fmt;

/// Where the session's input comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Source {
    /// Interactive standard input.
    Stdin,
    /// A single command given on the command line.
    Command(String),
    /// A script file on disk.
    File(String),
}

/// The fully parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Run {
    pub source: Source,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgsError {
    MissingCommandOperand,
    UnrecognizedOption(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingCommandOperand => write!(f, "-c requires a command operand"),
            ArgsError::UnrecognizedOption(opt) => write!(f, "unrecognized option '{opt}'"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Parses an argument iterator, excluding argv\[0\].
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Run, ArgsError> {
    let mut args = args.into_iter();

    let Some(first) = args.next() else {
        return Ok(Run {
            source: Source::Stdin,
        });
    };

    if first == "-c" {
        let command = args.next().ok_or(ArgsError::MissingCommandOperand)?;
        return Ok(Run {
            source: Source::Command(command),
        });
    }

    if let Some(opt) = first.strip_prefix('-') {
        if !opt.is_empty() {
            return Err(ArgsError::UnrecognizedOption(first));
        }
    }

    Ok(Run {
        source: Source::File(first),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Run, ArgsError> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_means_interactive_stdin() {
        let run = parse_strs(&[]).unwrap();
        assert_eq!(run.source, Source::Stdin);
    }

    #[test]
    fn dash_c_takes_a_command_operand() {
        let run = parse_strs(&["-c", "echo hi"]).unwrap();
        assert_eq!(run.source, Source::Command("echo hi".to_owned()));
    }

    #[test]
    fn dash_c_without_operand_is_an_error() {
        assert_eq!(parse_strs(&["-c"]), Err(ArgsError::MissingCommandOperand));
    }

    #[test]
    fn a_bare_path_is_a_script() {
        let run = parse_strs(&["script.wsh"]).unwrap();
        assert_eq!(run.source, Source::File("script.wsh".to_owned()));
    }

    #[test]
    fn trailing_arguments_after_a_script_path_are_ignored() {
        let run = parse_strs(&["script.wsh", "a", "b"]).unwrap();
        assert_eq!(run.source, Source::File("script.wsh".to_owned()));
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert_eq!(
            parse_strs(&["--bogus"]),
            Err(ArgsError::UnrecognizedOption("--bogus".to_owned()))
        );
    }
}
