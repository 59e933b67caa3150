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

//! What `execute_statement` reports on failure
//!
//! A statement either runs to completion with an exit code, or produces
//! one `Diagnostic`. Diagnostics carrying a source [`Location`] render as
//! `"<source>:<line>:<column>: <message>"`; execution failures, which have
//! no source position, render as `"<command>: <message>"`.

use thiserror::Error;
use wshell_env::Location;

/// An implementation-defined nonzero exit code used when a statement fails
/// for a reason that has no exit code of its own (e.g. an invalid
/// assignment, or a command whose name expanded to the empty string).
pub const CONSTRUCTION_FAILURE_EXIT_CODE: i32 = 127;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}", self.render())]
pub struct Diagnostic {
    location: Option<Location>,
    message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn at(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            location: Some(location),
            message: message.into(),
        }
    }

    /// A failure with no source location and no command context, such as
    /// an invalid assignment.
    #[must_use]
    pub fn plain(message: impl Into<String>) -> Self {
        Diagnostic {
            location: None,
            message: message.into(),
        }
    }

    /// An execution failure: no source location, but a command name and
    /// the backend's own message.
    #[must_use]
    pub fn execution(command: &str, message: Option<&str>) -> Self {
        let message = match message {
            Some(message) => format!("{command}: {message}"),
            None => command.to_owned(),
        };
        Diagnostic {
            location: None,
            message,
        }
    }

    fn render(&self) -> String {
        match &self.location {
            Some(location) => format!("{location}: {}", self.message),
            None => self.message.clone(),
        }
    }
}
