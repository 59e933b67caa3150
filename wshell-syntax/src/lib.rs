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

//! Grammar for the wshell command language
//!
//! This crate has no notion of execution; it only turns source text into
//! an [`ast::Program`]. [`wshell-semantics`](https://example.invalid) walks
//! the tree this crate produces.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, ParseErrorKind, SyntaxError};
pub use parser::{parse_line, parse_program};
