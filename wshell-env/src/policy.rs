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

//! Validation limits shared by the config loader and the variable store
//!
//! A [`Policy`] bundles the numeric limits that bound untrusted input
//! (config files, RC files, variable assignments) together with the
//! identifier validator both use. It is injected at construction rather
//! than hard-coded so callers can substitute a stricter policy, e.g. when
//! parsing content from an untrusted network peer.

/// Size and count limits enforced by the config loader and variable store
///
/// Two presets are provided: [`Policy::default`] for ordinary interactive
/// use and [`Policy::strict`] for hostile input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Policy {
    /// Largest number of bytes a single input source may yield.
    pub max_content_size: usize,
    /// Largest number of bytes a single line may contain.
    pub max_line_length: usize,
    /// Largest number of variables a single store may hold.
    pub max_variable_count: usize,
    /// Largest number of bytes a variable or config key name may contain.
    pub max_name_length: usize,
    /// Largest number of bytes a variable or config value may contain.
    pub max_value_length: usize,
}

impl Policy {
    /// Default limits: generous enough for ordinary interactive sessions.
    pub const DEFAULT: Policy = Policy {
        max_content_size: 1024 * 1024,
        max_line_length: 10_000,
        max_variable_count: 10_000,
        max_name_length: 1_000,
        max_value_length: 100_000,
    };

    /// Strict limits, appropriate when parsing content from an untrusted
    /// or adversarial source.
    pub const STRICT: Policy = Policy {
        max_content_size: 100 * 1024,
        max_line_length: 1_000,
        max_variable_count: 1_000,
        max_name_length: 100,
        max_value_length: 10_000,
    };

    /// Tests whether `name` is a valid identifier under this policy.
    ///
    /// A valid identifier is non-empty, begins with a letter or
    /// underscore, continues with letters, digits, or underscores, and is
    /// no longer than [`max_name_length`](Self::max_name_length).
    #[must_use]
    pub fn is_valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.len() > self.max_name_length {
            return false;
        }
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return false;
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::DEFAULT
    }
}
