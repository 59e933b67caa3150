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

//! `$VAR` and `${VAR}` substitution
//!
//! Expansion never fails: an unset or malformed reference contributes the
//! empty string (or, for a lone trailing `$`, the `$` itself) rather than
//! raising an error. Word splitting on the expanded result is intentionally
//! not performed; see the crate-level notes on this simplification.

use crate::variable::VariableStore;

/// Expands every `$VAR` and `${VAR}` reference in `raw` against `store`.
///
/// Unset names expand to the empty string. A lone `$` not followed by a
/// name or `{` is passed through verbatim. All other characters are copied
/// as-is.
#[must_use]
pub fn expand(raw: &str, store: &VariableStore) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    // No closing `}`: push the literal `$` and replay `{`
                    // plus whatever was consumed as plain text.
                    out.push('$');
                    out.push('{');
                    out.push_str(&name);
                    continue;
                }
                out.push_str(store.get(&name).unwrap_or(""));
            }
            Some(c) if is_name_char(*c) => {
                let mut name = String::new();
                while let Some(c) = chars.peek() {
                    if is_name_char(*c) {
                        name.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(store.get(&name).unwrap_or(""));
            }
            _ => out.push('$'),
        }
    }

    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn store_with(pairs: &[(&str, &str)]) -> VariableStore {
        let mut store = VariableStore::new(Policy::default());
        for (name, value) in pairs {
            store.set(name, *value).unwrap();
        }
        store
    }

    #[test]
    fn idempotent_when_no_dollar_present() {
        let store = VariableStore::new(Policy::default());
        assert_eq!(expand("hello world", &store), "hello world");
    }

    #[test]
    fn substitutes_unbraced_variable() {
        let store = store_with(&[("X", "42")]);
        assert_eq!(expand("value=$X!", &store), "value=42!");
    }

    #[test]
    fn substitutes_braced_variable() {
        let store = store_with(&[("X", "42")]);
        assert_eq!(expand("${X}ish", &store), "42ish");
    }

    #[test]
    fn unset_variable_expands_to_empty_string() {
        let store = VariableStore::new(Policy::default());
        assert_eq!(expand("[$MISSING]", &store), "[]");
    }

    #[test]
    fn lone_dollar_is_passed_through() {
        let store = VariableStore::new(Policy::default());
        assert_eq!(expand("price: $", &store), "price: $");
        assert_eq!(expand("$$", &store), "$$");
    }

    #[test]
    fn unclosed_brace_is_left_as_is() {
        let store = store_with(&[("bar", "x")]);
        assert_eq!(expand("foo${bar", &store), "foo${bar");
    }

    #[test]
    fn does_not_word_split_multi_word_values() {
        let store = store_with(&[("A", "foo bar")]);
        assert_eq!(expand("$A", &store), "foo bar");
    }
}
