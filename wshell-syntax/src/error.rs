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

//! Parser error taxonomy

use thiserror::Error;
use wshell_env::Location;

/// An unambiguous grammar violation
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// `|` opens a pipeline instead of following a command.
    #[error("a pipeline cannot start with '|'")]
    LeadingPipe,
    /// `||`, out of scope for this grammar.
    #[error("'||' is not supported")]
    DoubleBar,
    /// `&&`, out of scope for this grammar.
    #[error("'&&' is not supported")]
    DoubleAmpersand,
    /// `|` immediately followed by `;`, `|`, or the end of the statement.
    #[error("'|' must be followed by a command")]
    DanglingPipe,
    /// `;` opens a statement instead of following one.
    #[error("a statement cannot start with ';'")]
    LeadingSemicolon,
    /// `;;`.
    #[error("';;' is not a valid separator")]
    DoubleSemicolon,
    /// A redirection operator (`<`, `>`, `>>`) has no target word.
    #[error("redirection operator is missing its target")]
    MissingRedirectionTarget,
    /// `let` without a following identifier.
    #[error("'let' must be followed by a name")]
    MissingAssignmentName,
    /// `let NAME` without a following `=`.
    #[error("assignment is missing '='")]
    MissingAssignmentEquals,
    /// `&` preceded by whitespace-separated `&`, or otherwise out of place.
    #[error("'&' is not valid here")]
    MisplacedBackground,
    /// `&` with nothing before it.
    #[error("'&' must follow a command")]
    LeadingBackground,
    /// A token appeared where a command name or a statement separator was
    /// expected, and none of the other variants describes it precisely.
    #[error("unexpected token")]
    UnexpectedToken,
}

/// The result of a failed parse
///
/// `IncompleteInput` is not really a failure: it tells the caller the text
/// so far is a valid prefix of the grammar and more input may complete it.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Syntax(SyntaxError),
    #[error("incomplete input")]
    IncompleteInput,
}

/// A parse failure located in the source
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{location}: {kind}")]
pub struct ParseError {
    pub location: Location,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[must_use]
    pub fn syntax(location: Location, error: SyntaxError) -> Self {
        ParseError {
            location,
            kind: ParseErrorKind::Syntax(error),
        }
    }

    #[must_use]
    pub fn incomplete(location: Location) -> Self {
        ParseError {
            location,
            kind: ParseErrorKind::IncompleteInput,
        }
    }

    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self.kind, ParseErrorKind::IncompleteInput)
    }
}
