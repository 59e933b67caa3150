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

//! Interpreter driver and the contract it expects from a process launcher
//!
//! [`interpreter::Interpreter`] walks a [`wshell_syntax::ast::Program`],
//! calling into whatever implements [`backend::ExecutionBackend`] to
//! actually run commands. The host binary supplies a real backend; this
//! crate's own tests use [`backend::RecordingBackend`].

pub mod backend;
pub mod diagnostic;
pub mod interpreter;

pub use backend::{EnvironmentPolicy, ExecutionBackend, ExecutionRequest, ExecutionResult, StreamEndpoint};
pub use diagnostic::Diagnostic;
pub use interpreter::{Interpreter, EXIT_SUCCESS};
