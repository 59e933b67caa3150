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

//! The interpreter's variable store
//!
//! A [`VariableStore`] is a policy-validated mapping from identifier to
//! string. It backs both the shell's session variables and the result of
//! parsing an RC file (see [`crate::config`]), which is merged into it at
//! startup.

use crate::policy::Policy;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised when mutating a [`VariableStore`]
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VariableError {
    #[error("{0:?} is not a valid variable name")]
    InvalidName(String),
    #[error("value for {name:?} is {len} bytes, exceeding the {limit}-byte limit")]
    ValueTooLarge {
        name: String,
        len: usize,
        limit: usize,
    },
    #[error("variable store already holds the maximum of {limit} variables")]
    TooMany { limit: usize },
}

/// Policy-validated mapping from identifier to string
///
/// Keys are unique; insertion order is not preserved or relied upon by any
/// operation defined here.
#[derive(Clone, Debug, Default)]
pub struct VariableStore {
    policy: Policy,
    values: HashMap<String, String>,
}

impl VariableStore {
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        VariableStore {
            policy,
            values: HashMap::new(),
        }
    }

    /// Assigns `value` to `name`, validating both against the store's policy.
    ///
    /// Setting an existing name overwrites its value without counting
    /// against [`Policy::max_variable_count`]; only genuinely new names do.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), VariableError> {
        if !self.policy.is_valid_name(name) {
            return Err(VariableError::InvalidName(name.to_owned()));
        }
        let value = value.into();
        if value.len() > self.policy.max_value_length {
            return Err(VariableError::ValueTooLarge {
                name: name.to_owned(),
                len: value.len(),
                limit: self.policy.max_value_length,
            });
        }
        if !self.values.contains_key(name) && self.values.len() >= self.policy.max_variable_count {
            return Err(VariableError::TooMany {
                limit: self.policy.max_variable_count,
            });
        }
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merges `other` into `self`, with `other`'s values winning on conflict.
    ///
    /// Used to fold a parsed RC file's variables into the session store at
    /// startup.
    pub fn merge(&mut self, other: &VariableStore) -> Result<(), VariableError> {
        for (name, value) in &other.values {
            self.set(name, value.clone())?;
        }
        Ok(())
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}
