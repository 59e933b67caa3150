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

//! Bash-like `KEY=VALUE` config and RC file parsing
//!
//! [`parse`] turns RC-file text into a validated [`VariableStore`], which
//! the CLI then [merges](VariableStore::merge) into the interpreter's
//! session variables at startup.

use crate::policy::Policy;
use crate::variable::{VariableError, VariableStore};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a config or RC file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}: no such file")]
    FileNotFound(String),
    #[error("{0}: permission denied")]
    PermissionDenied(String),
    #[error("{name}: exceeds the {limit}-byte size limit")]
    TooLarge { name: String, limit: usize },
    #[error("{source_name}:{line}: {message}")]
    ParseError {
        source_name: String,
        line: u32,
        message: String,
    },
    #[error("{source_name}:{line}: {name:?} is not a valid variable name")]
    InvalidName {
        source_name: String,
        line: u32,
        name: String,
    },
    #[error("{source_name}:{line}: store already holds the maximum of {limit} variables")]
    TooMany {
        source_name: String,
        line: u32,
        limit: usize,
    },
    #[error("{0}: {1}")]
    IoError(String, #[source] std::io::Error),
}

/// Parses `content` as RC-file text, under `policy`, naming the source
/// `source_name` for diagnostics.
///
/// Grammar: lines separated by LF (CRLF accepted); a line is empty, a `#`
/// comment, or `NAME = VALUE` with optional surrounding whitespace. Lines
/// without an `=` are silently ignored. A `VALUE` wrapped in matching ASCII
/// `"` or `'` has those outer quotes stripped, with no escape processing.
pub fn parse(content: &str, source_name: &str, policy: &Policy) -> Result<VariableStore, ConfigError> {
    if content.len() > policy.max_content_size {
        return Err(ConfigError::TooLarge {
            name: source_name.to_owned(),
            limit: policy.max_content_size,
        });
    }

    let mut store = VariableStore::new(*policy);

    for (index, raw_line) in content.split('\n').enumerate() {
        let line_number = index as u32 + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if line.len() > policy.max_line_length {
            return Err(ConfigError::ParseError {
                source_name: source_name.to_owned(),
                line: line_number,
                message: format!(
                    "line exceeds the {}-byte line length limit",
                    policy.max_line_length
                ),
            });
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq_index) = trimmed.find('=') else {
            // Lines without `=` are silently ignored (bash-compat quirk).
            continue;
        };

        let name = trimmed[..eq_index].trim();
        let value = strip_matching_quotes(trimmed[eq_index + 1..].trim());

        if !policy.is_valid_name(name) {
            return Err(ConfigError::InvalidName {
                source_name: source_name.to_owned(),
                line: line_number,
                name: name.to_owned(),
            });
        }

        match store.set(name, value) {
            Ok(()) => {}
            Err(VariableError::TooMany { limit }) => {
                return Err(ConfigError::TooMany {
                    source_name: source_name.to_owned(),
                    line: line_number,
                    limit,
                });
            }
            Err(VariableError::ValueTooLarge { limit, .. }) => {
                return Err(ConfigError::ParseError {
                    source_name: source_name.to_owned(),
                    line: line_number,
                    message: format!("value exceeds the {limit}-byte value length limit"),
                });
            }
            Err(VariableError::InvalidName(name)) => {
                // Already validated above; unreachable in practice, but
                // surfaced faithfully if the policy ever disagrees with
                // itself between the two checks.
                return Err(ConfigError::InvalidName {
                    source_name: source_name.to_owned(),
                    line: line_number,
                    name,
                });
            }
        }
    }

    Ok(store)
}

fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// The default RC file path: the user's home directory joined with
/// `.wshellrc`.
///
/// The home directory comes from `$HOME` on POSIX systems (falling back to
/// a platform user-info lookup) or `%USERPROFILE%` on Windows.
#[must_use]
pub fn default_rc_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".wshellrc"))
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home));
    }
    nix::unistd::User::from_uid(nix::unistd::Uid::current())
        .ok()
        .flatten()
        .map(|user| user.dir)
}

#[cfg(not(any(windows, unix)))]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_three_variables_with_expected_values() {
        let content = "VAR1=value1\nVAR2=\"two words\"\n# note\nVAR3='x=y'\n";
        let store = parse(content, "<test>", &Policy::default()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("VAR1"), Some("value1"));
        assert_eq!(store.get("VAR2"), Some("two words"));
        assert_eq!(store.get("VAR3"), Some("x=y"));
    }

    #[test]
    fn ignores_lines_without_equals() {
        let content = "not an assignment\nX=1\n";
        let store = parse(content, "<test>", &Policy::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("X"), Some("1"));
    }

    #[test]
    fn ignores_blank_and_comment_lines() {
        let content = "\n   \n# comment\nX=1\n";
        let store = parse(content, "<test>", &Policy::default()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_names_keep_the_last_occurrence() {
        let content = "X=1\nX=2\n";
        let store = parse(content, "<test>", &Policy::default()).unwrap();
        assert_eq!(store.get("X"), Some("2"));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = "X=1\r\nY=2\r\n";
        let store = parse(content, "<test>", &Policy::default()).unwrap();
        assert_eq!(store.get("X"), Some("1"));
        assert_eq!(store.get("Y"), Some("2"));
    }

    #[test]
    fn invalid_name_reports_its_line_number() {
        let content = "X=1\n1BAD=2\n";
        let err = parse(content, "rc", &Policy::default()).unwrap_err();
        match err {
            ConfigError::InvalidName { line, name, .. } => {
                assert_eq!(line, 2);
                assert_eq!(name, "1BAD");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn content_over_max_size_is_rejected() {
        let policy = Policy {
            max_content_size: 4,
            ..Policy::default()
        };
        let err = parse("X=12345", "<test>", &policy).unwrap_err();
        assert_matches!(err, ConfigError::TooLarge { limit: 4, .. });
    }

    #[test]
    fn content_at_exact_max_size_succeeds() {
        let policy = Policy {
            max_content_size: 3,
            ..Policy::default()
        };
        let store = parse("X=1", "<test>", &policy).unwrap();
        assert_eq!(store.get("X"), Some("1"));
    }

    #[test]
    fn too_many_variables_is_reported_with_its_line() {
        let policy = Policy {
            max_variable_count: 1,
            ..Policy::default()
        };
        let err = parse("X=1\nY=2\n", "<test>", &policy).unwrap_err();
        assert_matches!(err, ConfigError::TooMany { line: 2, limit: 1, .. });
    }
}
