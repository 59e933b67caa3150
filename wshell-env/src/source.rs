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

//! Diagnostic source locations
//!
//! [`Location`] identifies a single 1-based line and column in a named
//! source. It is shared by the config loader, the lexer, and the parser so
//! that every user-visible diagnostic can be rendered in the uniform
//! `"<source>:<line>:<column>: <message>"` format required by the error
//! handling design.

use std::fmt;

/// Named origin of a piece of input
///
/// Distinguishes where source text came from for diagnostic purposes. This
/// is deliberately simpler than a full source map: the core only ever needs
/// to name the origin, not slice back into it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Source {
    /// A file on disk, identified by path.
    File(String),
    /// The per-user RC file.
    RcFile(String),
    /// An interactive or piped stream with no file of its own.
    Stream(String),
    /// A string provided directly by a caller (tests, `-c COMMAND`).
    String,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) | Source::RcFile(path) => write!(f, "{path}"),
            Source::Stream(name) => write!(f, "{name}"),
            Source::String => write!(f, "<string>"),
        }
    }
}

/// Position of a single character in a [`Source`]
///
/// Both `line` and `column` are 1-based, matching the convention used
/// throughout the lexer and parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub source: Source,
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[must_use]
    pub fn new(source: Source, line: u32, column: u32) -> Self {
        Location {
            source,
            line,
            column,
        }
    }

    /// A location with no meaningful source, for tests and defaults.
    #[must_use]
    pub fn dummy() -> Self {
        Location {
            source: Source::String,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_source_colon_line_colon_column() {
        let loc = Location::new(Source::File("script.wsh".to_owned()), 3, 7);
        assert_eq!(loc.to_string(), "script.wsh:3:7");
    }

    #[test]
    fn stream_source_displays_its_name() {
        let loc = Location::new(Source::Stream("<stdin>".to_owned()), 1, 1);
        assert_eq!(loc.to_string(), "<stdin>:1:1");
    }
}
