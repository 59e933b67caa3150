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

//! Recursive-descent parser
//!
//! ```text
//! program   := { newline } { top_level { newline+ top_level } } { newline }
//! top_level := seq_item { SEMI seq_item }
//! seq_item  := comment | assignment | pipeline
//! assignment:= LET IDENT EQUALS value_tail
//! pipeline  := command { PIPE command }
//! command   := IDENT { word_arg } { redirection } [ AMP ]
//! ```

use crate::ast::{
    Assignment, Command, Comment, Pipeline, Program, RedirKind, Redirection, Sequence, Statement,
    Word,
};
use crate::error::{ParseError, SyntaxError};
use crate::lexer::{Lexer, Token, TokenKind};
use wshell_env::Source;

/// Parses exactly one REPL line: a single top-level item plus at most one
/// trailing newline or semicolon.
///
/// Because a REPL can always offer the user another line, a trailing `|`
/// at end of input is reported as [`IncompleteInput`](crate::error::ParseErrorKind::IncompleteInput)
/// here, rather than the hard `SyntaxError::DanglingPipe` [`parse_program`]
/// gives the same token sequence.
pub fn parse_line(input: &str, source: Source) -> Result<Program, ParseError> {
    let mut parser = Parser::new(input, source, true);
    parser.skip_newlines();
    if parser.at_end() {
        return Ok(Program::default());
    }
    let item = parser.parse_top_level()?;
    parser.skip_one_trailing_separator();
    parser.skip_newlines();
    if !parser.at_end() {
        return Err(ParseError::incomplete(parser.current_location()));
    }
    Ok(Program {
        statements: vec![item],
    })
}

/// Parses any number of top-level items separated by newlines and/or
/// semicolons, as in a script file.
pub fn parse_program(input: &str, source: Source) -> Result<Program, ParseError> {
    let mut parser = Parser::new(input, source, false);
    let mut statements = Vec::new();
    parser.skip_newlines();
    while !parser.at_end() {
        statements.push(parser.parse_top_level()?);
        if parser.at_end() {
            break;
        }
        if !parser.at_newline() {
            return Err(ParseError::syntax(
                parser.current_location(),
                SyntaxError::UnexpectedToken,
            ));
        }
        parser.skip_newlines();
    }
    Ok(Program { statements })
}

struct Parser {
    lexer: Lexer,
    /// Set for [`parse_line`], which may still receive a continuation line;
    /// clear for [`parse_program`], which has already seen everything.
    continuation: bool,
}

impl Parser {
    fn new(input: &str, source: Source, continuation: bool) -> Self {
        Parser {
            lexer: Lexer::new(input, source),
            continuation,
        }
    }

    fn peek(&mut self) -> &Token {
        self.lexer.peek()
    }

    fn next(&mut self) -> Token {
        self.lexer.next_token()
    }

    fn current_location(&mut self) -> wshell_env::Location {
        self.peek().location.clone()
    }

    fn at_end(&mut self) -> bool {
        matches!(self.peek().kind, TokenKind::EndOfFile)
    }

    fn at_newline(&mut self) -> bool {
        matches!(self.peek().kind, TokenKind::Newline)
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.next();
        }
    }

    /// Consumes a single trailing `;` if present (REPL line termination).
    fn skip_one_trailing_separator(&mut self) {
        if matches!(self.peek().kind, TokenKind::Semicolon) {
            self.next();
        }
    }

    fn parse_top_level(&mut self) -> Result<Statement, ParseError> {
        if matches!(self.peek().kind, TokenKind::Semicolon) {
            return Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::LeadingSemicolon,
            ));
        }
        let mut items = vec![self.parse_seq_item()?];
        while matches!(self.peek().kind, TokenKind::Semicolon) {
            self.next();
            if matches!(self.peek().kind, TokenKind::Semicolon) {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::DoubleSemicolon,
                ));
            }
            if matches!(
                self.peek().kind,
                TokenKind::Newline | TokenKind::EndOfFile
            ) {
                break;
            }
            items.push(self.parse_seq_item()?);
        }
        if items.len() == 1 {
            Ok(items.pop().unwrap())
        } else {
            Ok(Statement::Sequence(Sequence::new(items)))
        }
    }

    fn parse_seq_item(&mut self) -> Result<Statement, ParseError> {
        match &self.peek().kind {
            TokenKind::Comment(_) => {
                let token = self.next();
                let TokenKind::Comment(text) = token.kind else {
                    unreachable!()
                };
                Ok(Statement::Comment(Comment { text }))
            }
            TokenKind::Let => self.parse_assignment().map(Statement::Assignment),
            TokenKind::Pipe => Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::LeadingPipe,
            )),
            TokenKind::Background => Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::LeadingBackground,
            )),
            TokenKind::Semicolon => Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::LeadingSemicolon,
            )),
            _ => self.parse_pipeline(),
        }
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        self.next(); // consume `let`

        let name = match &self.peek().kind {
            TokenKind::Identifier(text) => text.clone(),
            _ => {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::MissingAssignmentName,
                ))
            }
        };
        self.next();

        if !matches!(self.peek().kind, TokenKind::Equals) {
            return Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::MissingAssignmentEquals,
            ));
        }
        self.next();

        let mut parts = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::EndOfFile
        ) {
            parts.push(make_word(token_text(self.next().kind)).text);
        }
        Ok(Assignment {
            name,
            value: parts.join(" "),
        })
    }

    fn parse_pipeline(&mut self) -> Result<Statement, ParseError> {
        if matches!(self.peek().kind, TokenKind::Pipe) {
            return Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::LeadingPipe,
            ));
        }
        let mut commands = vec![self.parse_command()?];
        while matches!(self.peek().kind, TokenKind::Pipe) {
            self.next();
            if self.continuation {
                // A trailing newline is just how the REPL terminates the
                // line it already read; the next pipeline stage may still
                // arrive on a continuation line.
                self.skip_newlines();
            }
            let continuation = self.continuation;
            match &self.peek().kind {
                TokenKind::Pipe => {
                    return Err(ParseError::syntax(
                        self.current_location(),
                        SyntaxError::DoubleBar,
                    ))
                }
                TokenKind::EndOfFile if continuation => {
                    return Err(ParseError::incomplete(self.current_location()))
                }
                TokenKind::Semicolon | TokenKind::Newline | TokenKind::EndOfFile => {
                    return Err(ParseError::syntax(
                        self.current_location(),
                        SyntaxError::DanglingPipe,
                    ))
                }
                _ => {}
            }
            let command = self.parse_command()?;
            if commands.last().unwrap().background {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::MisplacedBackground,
                ));
            }
            commands.push(command);
        }
        if commands.len() == 1 {
            Ok(Statement::Command(commands.pop().unwrap()))
        } else {
            Ok(Statement::Pipeline(Pipeline::new(commands)))
        }
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        let name_text = match &self.peek().kind {
            TokenKind::Identifier(text) => text.clone(),
            TokenKind::Let => "let".to_owned(),
            TokenKind::Background => {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::LeadingBackground,
                ))
            }
            TokenKind::Semicolon => {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::LeadingSemicolon,
                ))
            }
            TokenKind::Pipe => {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::LeadingPipe,
                ))
            }
            // `parse_pipeline` and `parse_top_level` both check the lookahead
            // token before ever calling into a command, so a bare command
            // position never actually sees `Newline` or `EndOfFile` here;
            // both fall through to the catch-all below.
            _ => {
                return Err(ParseError::syntax(
                    self.current_location(),
                    SyntaxError::UnexpectedToken,
                ))
            }
        };
        self.next();
        let mut command = Command::new(make_word(name_text));

        loop {
            match &self.peek().kind {
                TokenKind::Identifier(text) => {
                    let text = text.clone();
                    self.next();
                    command.args.push(make_word(text));
                }
                TokenKind::Let => {
                    self.next();
                    command.args.push(make_word("let".to_owned()));
                }
                TokenKind::Equals => {
                    self.next();
                    command.args.push(make_word("=".to_owned()));
                }
                TokenKind::Redirect(op) => {
                    let kind = redirect_kind(op);
                    self.next();
                    let target = self.parse_redirection_target()?;
                    command.redirs.push(Redirection { kind, target });
                }
                TokenKind::Background => {
                    self.next();
                    command.background = true;
                    if matches!(self.peek().kind, TokenKind::Background) {
                        return Err(ParseError::syntax(
                            self.current_location(),
                            SyntaxError::DoubleAmpersand,
                        ));
                    }
                    if matches!(
                        self.peek().kind,
                        TokenKind::Identifier(_)
                            | TokenKind::Let
                            | TokenKind::Equals
                            | TokenKind::Redirect(_)
                    ) {
                        return Err(ParseError::syntax(
                            self.current_location(),
                            SyntaxError::MisplacedBackground,
                        ));
                    }
                    break;
                }
                _ => break,
            }
        }

        Ok(command)
    }

    fn parse_redirection_target(&mut self) -> Result<Word, ParseError> {
        match &self.peek().kind {
            TokenKind::Identifier(text) => {
                let text = text.clone();
                self.next();
                Ok(make_word(text))
            }
            TokenKind::Let => {
                self.next();
                Ok(make_word("let".to_owned()))
            }
            _ => Err(ParseError::syntax(
                self.current_location(),
                SyntaxError::MissingRedirectionTarget,
            )),
        }
    }
}

fn redirect_kind(op: &str) -> RedirKind {
    match op {
        "<" => RedirKind::Input,
        ">>" => RedirKind::OutputAppend,
        _ => RedirKind::OutputTruncate,
    }
}

/// Strips a matching pair of surrounding double quotes, if present,
/// marking the resulting [`Word`] as quoted. An opening quote with no
/// closing quote is accepted as-is (no error), per the spec's tolerance
/// for input truncated mid-quote.
fn make_word(text: String) -> Word {
    if let Some(rest) = text.strip_prefix('"') {
        let inner = rest.strip_suffix('"').unwrap_or(rest);
        Word::new(inner, true)
    } else {
        Word::new(text, false)
    }
}

fn token_text(kind: TokenKind) -> String {
    match kind {
        TokenKind::Identifier(text) => text,
        TokenKind::Let => "let".to_owned(),
        TokenKind::Equals => "=".to_owned(),
        TokenKind::Pipe => "|".to_owned(),
        TokenKind::Background => "&".to_owned(),
        TokenKind::Redirect(op) => op,
        TokenKind::Comment(text) => text,
        TokenKind::Newline | TokenKind::Semicolon | TokenKind::EndOfFile => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RedirKind;
    use assert_matches::assert_matches;

    fn program(input: &str) -> Program {
        parse_program(input, Source::String).expect("parse should succeed")
    }

    #[test]
    fn parses_simple_command() {
        let prog = program("echo hi");
        assert_eq!(prog.statements.len(), 1);
        let Statement::Command(cmd) = &prog.statements[0] else {
            panic!("expected a command");
        };
        assert_eq!(cmd.name.text, "echo");
        assert_eq!(cmd.args.len(), 1);
        assert_eq!(cmd.args[0].text, "hi");
    }

    #[test]
    fn single_command_pipeline_collapses_to_command() {
        let prog = program("echo hi");
        assert_matches!(prog.statements[0], Statement::Command(_));
    }

    #[test]
    fn two_command_pipeline_stays_a_pipeline() {
        let prog = program("echo hi | cat");
        let Statement::Pipeline(pipeline) = &prog.statements[0] else {
            panic!("expected a pipeline");
        };
        assert_eq!(pipeline.commands.len(), 2);
    }

    #[test]
    fn single_statement_list_collapses() {
        let prog = program("echo hi");
        assert_matches!(prog.statements[0], Statement::Command(_));
    }

    #[test]
    fn semicolon_separated_list_becomes_sequence() {
        let prog = program("let x = 1 ; echo hi");
        let Statement::Sequence(seq) = &prog.statements[0] else {
            panic!("expected a sequence");
        };
        assert_eq!(seq.statements.len(), 2);
        assert_matches!(seq.statements[0], Statement::Assignment(_));
        assert_matches!(seq.statements[1], Statement::Command(_));
    }

    #[test]
    fn assignment_with_empty_value_is_accepted() {
        let prog = program("let x =");
        let Statement::Assignment(assignment) = &prog.statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.name, "x");
        assert_eq!(assignment.value, "");
    }

    #[test]
    fn assignment_value_strips_surrounding_quotes() {
        let prog = program("let x = \"a b\"");
        let Statement::Assignment(assignment) = &prog.statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.value, "a b");
    }

    #[test]
    fn redirection_operators_map_to_the_right_kind() {
        let prog = program("cat < in.txt > out.txt");
        let Statement::Command(cmd) = &prog.statements[0] else {
            panic!("expected a command");
        };
        assert_eq!(cmd.redirs[0].kind, RedirKind::Input);
        assert_eq!(cmd.redirs[1].kind, RedirKind::OutputTruncate);
    }

    #[test]
    fn double_greater_than_is_append() {
        let prog = program("cat >> out.txt");
        let Statement::Command(cmd) = &prog.statements[0] else {
            panic!("expected a command");
        };
        assert_eq!(cmd.redirs[0].kind, RedirKind::OutputAppend);
    }

    #[test]
    fn quoted_argument_strips_outer_quotes() {
        let prog = program("echo \"hi\"");
        let Statement::Command(cmd) = &prog.statements[0] else {
            panic!("expected a command");
        };
        assert!(cmd.args[0].quoted);
        assert_eq!(cmd.args[0].text, "hi");
    }

    #[test]
    fn background_flag_is_set_on_trailing_ampersand() {
        let prog = program("sleep 1 &");
        let Statement::Command(cmd) = &prog.statements[0] else {
            panic!("expected a command");
        };
        assert!(cmd.background);
    }

    #[test]
    fn comment_line_is_a_no_op_statement() {
        let prog = program("# just a note");
        assert_matches!(prog.statements[0], Statement::Comment(_));
    }

    #[test]
    fn leading_pipe_is_a_syntax_error() {
        let err = parse_program("| grep foo", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::LeadingPipe));
    }

    #[test]
    fn double_bar_is_a_syntax_error() {
        let err = parse_program("echo hi || echo bye", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::DoubleBar));
    }

    #[test]
    fn leading_semicolon_is_a_syntax_error() {
        let err = parse_program("; echo hi", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::LeadingSemicolon));
    }

    #[test]
    fn double_semicolon_is_a_syntax_error() {
        let err = parse_program("echo hi ;; echo bye", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::DoubleSemicolon));
    }

    #[test]
    fn redirection_without_target_is_a_syntax_error() {
        let err = parse_program("cat >", Source::String).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ParseErrorKind::Syntax(SyntaxError::MissingRedirectionTarget)
        );
    }

    #[test]
    fn let_missing_identifier_is_a_syntax_error() {
        let err = parse_program("let = 1", Source::String).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ParseErrorKind::Syntax(SyntaxError::MissingAssignmentName)
        );
    }

    #[test]
    fn let_missing_equals_is_a_syntax_error() {
        let err = parse_program("let x 1", Source::String).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ParseErrorKind::Syntax(SyntaxError::MissingAssignmentEquals)
        );
    }

    #[test]
    fn lone_background_is_a_syntax_error() {
        let err = parse_program("&", Source::String).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ParseErrorKind::Syntax(SyntaxError::LeadingBackground)
        );
    }

    #[test]
    fn double_ampersand_is_a_syntax_error() {
        let err = parse_program("sleep 1 && echo done", Source::String).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ParseErrorKind::Syntax(SyntaxError::DoubleAmpersand)
        );
    }

    #[test]
    fn trailing_pipe_at_end_of_a_whole_program_is_a_syntax_error() {
        let err = parse_program("grep foo |", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::DanglingPipe));
    }

    #[test]
    fn assignment_then_trailing_pipe_in_a_whole_program_is_a_syntax_error() {
        let err = parse_program("let x = 42 ; echo hi |", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::DanglingPipe));
    }

    #[test]
    fn trailing_pipe_on_a_repl_line_is_incomplete_input() {
        let err = parse_line("grep foo |", Source::String).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn trailing_pipe_before_a_real_newline_on_a_repl_line_is_still_a_syntax_error() {
        let err = parse_line("grep foo | ; echo hi", Source::String).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::Syntax(SyntaxError::DanglingPipe));
    }

    #[test]
    fn parse_line_rejects_a_second_statement() {
        let err = parse_line("echo hi\necho bye", Source::String).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn empty_program_parses_to_no_statements() {
        let prog = program("");
        assert!(prog.statements.is_empty());
    }

    #[test]
    fn empty_program_with_only_newlines_parses_to_no_statements() {
        let prog = program("\n\n\n");
        assert!(prog.statements.is_empty());
    }

    #[test]
    fn multiple_newline_separated_statements() {
        let prog = program("echo a\necho b\n");
        assert_eq!(prog.statements.len(), 2);
    }
}
