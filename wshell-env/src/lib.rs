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

//! Session state and I/O primitives for the wshell interpreter
//!
//! This crate has no dependency on the shell grammar: it defines the
//! validation policy, the input/output trait objects, the config and RC
//! file loader, the variable store, the command history ring, and the
//! variable expander. [`wshell-syntax`](https://example.invalid) and
//! [`wshell-semantics`](https://example.invalid) build the lexer, parser,
//! and interpreter on top of these primitives.

pub mod config;
pub mod expand;
pub mod history;
pub mod io;
pub mod policy;
pub mod source;
pub mod variable;

pub use config::{parse as parse_config, ConfigError};
pub use history::History;
pub use policy::Policy;
pub use source::{Location, Source};
pub use variable::{VariableError, VariableStore};
