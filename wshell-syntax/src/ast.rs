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

//! The abstract syntax tree
//!
//! Every node here is a value type composed by containment: no node
//! references another, and there is no shared or cyclic ownership. The
//! parser is the only code that constructs these types and is responsible
//! for upholding the invariants documented on [`Pipeline`] and [`Sequence`].

/// A lexical atom contributed to a command
///
/// `quoted` records whether the source token was written inside double
/// quotes; when it is, word splitting never applies to this word's
/// expansion. `needs_expansion` is a cheap precomputed hint that the text
/// contains a `$` and so is worth scanning during expansion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    pub text: String,
    pub quoted: bool,
    pub needs_expansion: bool,
}

impl Word {
    #[must_use]
    pub fn new(text: impl Into<String>, quoted: bool) -> Self {
        let text = text.into();
        let needs_expansion = text.contains('$');
        Word {
            text,
            quoted,
            needs_expansion,
        }
    }
}

/// Kind of a [`Redirection`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirKind {
    /// `<`
    Input,
    /// `>`
    OutputTruncate,
    /// `>>`
    OutputAppend,
}

/// A single redirection, e.g. `> out.txt`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirection {
    pub kind: RedirKind,
    pub target: Word,
}

/// A simple command: a name, its arguments, its redirections, and whether
/// it backgrounds.
///
/// `background` is only meaningful, and only ever set, on the command that
/// terminates a statement (the last command of a pipeline, or the sole
/// command of a bare statement).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub name: Word,
    pub args: Vec<Word>,
    pub redirs: Vec<Redirection>,
    pub background: bool,
}

impl Command {
    #[must_use]
    pub fn new(name: Word) -> Self {
        Command {
            name,
            args: Vec::new(),
            redirs: Vec::new(),
            background: false,
        }
    }
}

/// Commands separated by `|`
///
/// Invariant: a `Pipeline` always holds at least two commands. A
/// single-command pipeline collapses to a bare [`Command`] at parse time
/// and is never represented as a `Pipeline`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    /// # Panics
    /// Panics if `commands` has fewer than two elements.
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        assert!(
            commands.len() >= 2,
            "a Pipeline must hold at least two commands"
        );
        Pipeline { commands }
    }
}

/// `(name, value)` produced by `let NAME = VALUE`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// A `#`-prefixed comment; semantically a no-op
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub text: String,
}

/// Tagged variant over the kinds of statement the parser produces
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    Command(Command),
    Pipeline(Pipeline),
    Sequence(Sequence),
    Assignment(Assignment),
    Comment(Comment),
}

/// Statements separated by `;`
///
/// Invariant: a `Sequence` always holds at least two statements. A
/// one-statement sequence collapses to that statement at parse time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    pub statements: Vec<Statement>,
}

impl Sequence {
    /// # Panics
    /// Panics if `statements` has fewer than two elements.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        assert!(
            statements.len() >= 2,
            "a Sequence must hold at least two statements"
        );
        Sequence { statements }
    }
}

/// The parsed form of a whole script or a single REPL line
///
/// An empty program (no statements) is legal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least two commands")]
    fn pipeline_of_one_command_panics() {
        let cmd = Command::new(Word::new("echo", false));
        Pipeline::new(vec![cmd]);
    }

    #[test]
    #[should_panic(expected = "at least two statements")]
    fn sequence_of_one_statement_panics() {
        let stmt = Statement::Comment(Comment {
            text: String::new(),
        });
        Sequence::new(vec![stmt]);
    }

    #[test]
    fn word_precomputes_needs_expansion() {
        assert!(Word::new("$X", false).needs_expansion);
        assert!(!Word::new("plain", false).needs_expansion);
    }
}
