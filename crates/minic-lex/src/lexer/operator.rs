//! Operator and punctuation lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes operators and punctuation.
    ///
    /// Handles the single-character set `+ - * / ; ( ) { } < >`, the
    /// two-character `==` and `!=`, and bare `=` as assignment. A bare `!`
    /// or any character outside the alphabet is a lexical error; `None` is
    /// returned and scanning continues after it.
    pub(crate) fn lex_operator(&mut self) -> Option<Token> {
        let c = self.cursor.current_char();
        self.cursor.advance();

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '=' => {
                if self.cursor.match_char('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    TokenKind::NotEqual
                } else {
                    self.report_error(format!("Unknown symbol: '{}'", c));
                    return None;
                }
            }
            _ => {
                self.report_error(format!("Unknown symbol: '{}'", c));
                return None;
            }
        };

        let text = self.cursor.slice_from(self.token_start);
        Some(Token::new(kind, text, self.token_line, self.token_column))
    }
}
