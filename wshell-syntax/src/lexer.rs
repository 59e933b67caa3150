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

//! Single-pass, position-tracked tokenizer
//!
//! The lexer never fails: it has no notion of an invalid character, only
//! words it doesn't recognize as an operator. Error detection is entirely
//! the parser's job.

use wshell_env::{Location, Source};

/// The kind of a single token
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// A generic word, including the reserved words other than `let`.
    Identifier(String),
    /// The reserved word `let`.
    Let,
    /// `=`
    Equals,
    /// A `#` comment, value already stripped of a single leading space.
    Comment(String),
    /// A line feed.
    Newline,
    /// `|`
    Pipe,
    /// `<`, `>`, or `>>`.
    Redirect(String),
    /// `;`
    Semicolon,
    /// `&`
    Background,
    /// No more input.
    EndOfFile,
}

/// A [`TokenKind`] paired with where it started in the source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

/// Tokenizes `input`, reporting positions relative to `source`.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    source: Source,
    lookahead: Option<Token>,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str, source: Source) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            source,
            lookahead: None,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn current_location(&self) -> Location {
        Location::new(self.source.clone(), self.line, self.column)
    }

    fn skip_horizontal_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        if self.lookahead.is_none() {
            let token = self.lex_next();
            self.lookahead = Some(token);
        }
        self.lookahead.as_ref().unwrap()
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.lookahead.take() {
            return token;
        }
        self.lex_next()
    }

    fn lex_next(&mut self) -> Token {
        self.skip_horizontal_whitespace();
        let location = self.current_location();

        let Some(c) = self.peek_char() else {
            return Token {
                kind: TokenKind::EndOfFile,
                location,
            };
        };

        match c {
            '\n' => {
                self.advance();
                Token {
                    kind: TokenKind::Newline,
                    location,
                }
            }
            '|' => {
                self.advance();
                Token {
                    kind: TokenKind::Pipe,
                    location,
                }
            }
            ';' => {
                self.advance();
                Token {
                    kind: TokenKind::Semicolon,
                    location,
                }
            }
            '&' => {
                self.advance();
                Token {
                    kind: TokenKind::Background,
                    location,
                }
            }
            '=' => {
                self.advance();
                Token {
                    kind: TokenKind::Equals,
                    location,
                }
            }
            '<' => {
                self.advance();
                Token {
                    kind: TokenKind::Redirect("<".to_owned()),
                    location,
                }
            }
            '>' => {
                self.advance();
                let value = if self.peek_char() == Some('>') {
                    self.advance();
                    ">>"
                } else {
                    ">"
                };
                Token {
                    kind: TokenKind::Redirect(value.to_owned()),
                    location,
                }
            }
            '#' => {
                self.advance();
                if self.peek_char() == Some(' ') {
                    self.advance();
                }
                let mut text = String::new();
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.advance();
                }
                Token {
                    kind: TokenKind::Comment(text),
                    location,
                }
            }
            '"' => {
                let word = self.lex_word();
                Token {
                    kind: identifier_or_keyword(word),
                    location,
                }
            }
            _ => {
                let word = self.lex_word();
                Token {
                    kind: identifier_or_keyword(word),
                    location,
                }
            }
        }
    }

    /// Consumes a maximal run of non-operator, non-whitespace characters,
    /// treating a double-quoted span as part of the same word.
    fn lex_word(&mut self) -> String {
        let mut word = String::new();
        let mut in_quotes = false;
        loop {
            let Some(c) = self.peek_char() else { break };
            if in_quotes {
                word.push(c);
                self.advance();
                if c == '"' {
                    in_quotes = false;
                }
                continue;
            }
            if c == '"' {
                word.push(c);
                self.advance();
                in_quotes = true;
                continue;
            }
            if is_word_char(c) {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    /// True when, ignoring whitespace, the next character starts a new
    /// word continuation rather than a fresh token (used by the parser to
    /// stitch together space-joined quoted arguments).
    #[must_use]
    pub fn at_quote_continuation(&self) -> bool {
        self.peek_char_at(0) == Some(' ') && self.peek_char_at(1) == Some('"')
    }
}

fn is_word_char(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '\n' | '=' | '#' | '|' | '&' | ';' | '<' | '>')
}

fn identifier_or_keyword(word: String) -> TokenKind {
    if word == "let" {
        TokenKind::Let
    } else {
        TokenKind::Identifier(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input, Source::String);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = matches!(token.kind, TokenKind::EndOfFile);
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_command() {
        assert_eq!(
            kinds("echo hi"),
            vec![
                TokenKind::Identifier("echo".to_owned()),
                TokenKind::Identifier("hi".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn recognizes_let_keyword() {
        assert_eq!(
            kinds("let x = 1"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("x".to_owned()),
                TokenKind::Equals,
                TokenKind::Identifier("1".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn double_greater_than_is_one_append_token() {
        assert_eq!(
            kinds(">>"),
            vec![TokenKind::Redirect(">>".to_owned()), TokenKind::EndOfFile]
        );
    }

    #[test]
    fn single_greater_than_is_truncate_token() {
        assert_eq!(
            kinds("> out"),
            vec![
                TokenKind::Redirect(">".to_owned()),
                TokenKind::Identifier("out".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn comment_strips_one_leading_space() {
        assert_eq!(
            kinds("# hello"),
            vec![
                TokenKind::Comment("hello".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn comment_keeps_extra_leading_spaces() {
        assert_eq!(
            kinds("#  hello"),
            vec![
                TokenKind::Comment(" hello".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn comment_stops_before_newline() {
        let mut lexer = Lexer::new("# hi\necho", Source::String);
        assert_eq!(lexer.next_token().kind, TokenKind::Comment("hi".to_owned()));
        assert_eq!(lexer.next_token().kind, TokenKind::Newline);
        assert_eq!(
            lexer.next_token().kind,
            TokenKind::Identifier("echo".to_owned())
        );
    }

    #[test]
    fn dollar_references_are_ordinary_word_characters() {
        assert_eq!(
            kinds("echo $VAR"),
            vec![
                TokenKind::Identifier("echo".to_owned()),
                TokenKind::Identifier("$VAR".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("a b", Source::String);
        assert_eq!(
            lexer.peek().kind,
            TokenKind::Identifier("a".to_owned())
        );
        assert_eq!(
            lexer.next_token().kind,
            TokenKind::Identifier("a".to_owned())
        );
        assert_eq!(
            lexer.next_token().kind,
            TokenKind::Identifier("b".to_owned())
        );
    }

    #[test]
    fn quoted_word_is_kept_together_with_quotes() {
        assert_eq!(
            kinds("\"hi\""),
            vec![
                TokenKind::Identifier("\"hi\"".to_owned()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let mut lexer = Lexer::new("a\nb", Source::String);
        let first = lexer.next_token();
        assert_eq!((first.location.line, first.location.column), (1, 1));
        let newline = lexer.next_token();
        assert_eq!((newline.location.line, newline.location.column), (1, 2));
        let second = lexer.next_token();
        assert_eq!((second.location.line, second.location.column), (2, 1));
    }
}
