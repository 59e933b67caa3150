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

//! Uniform input and output abstractions
//!
//! These traits let the rest of the crate stay agnostic to whether it is
//! talking to a real file, an interactive stream, or an in-memory buffer
//! used by tests.

pub mod input;
pub mod output;

pub use input::{InputError, InputSource};
pub use output::{OutputDestination, OutputError};
