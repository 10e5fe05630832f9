//! Core lexer: scanning loop, whitespace and comment handling, and the
//! buffered token stream handed to the parser.

use minic_util::{Category, Diagnostic, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{render_token_table, Token, TokenKind};

/// Lexer for Mini source text.
///
/// [`run`](Lexer::run) scans the entire source into a token list
/// terminated by a single EOF token. [`next`](Lexer::next) then hands the
/// buffered tokens out one at a time; once the end is reached it keeps
/// returning the EOF token, so the parser can over-read safely. The
/// buffer position lives in the lexer instance, so two pipelines in one
/// process never interfere.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,

    /// Shared diagnostics sink for lexical errors.
    handler: &'a Handler,

    /// Tokens produced by `run`, ending with exactly one EOF token.
    tokens: Vec<Token>,

    /// Read position of `next` within `tokens`.
    next_index: usize,

    /// Byte offset where the current token started.
    pub(crate) token_start: usize,

    /// Line where the current token started (1-based).
    pub(crate) token_line: u32,

    /// Column where the current token started (0-based).
    pub(crate) token_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source` reporting errors to `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            tokens: Vec::new(),
            next_index: 0,
            token_start: 0,
            token_line: 1,
            token_column: 0,
        }
    }

    /// Scans the whole source, filling the token buffer.
    ///
    /// Lexical errors are reported and the offending character skipped, so
    /// a single run surfaces every lexical problem in the input.
    pub fn run(&mut self) {
        // A UTF-8 byte-order mark at offset 0 does not start a token.
        if self.cursor.position() == 0 && self.cursor.current_char() == '\u{feff}' {
            self.cursor.advance();
        }

        loop {
            self.skip_whitespace_and_comments();

            self.token_start = self.cursor.position();
            self.token_line = self.cursor.line();
            self.token_column = self.cursor.column();

            if self.cursor.is_at_end() {
                break;
            }

            if let Some(token) = self.scan_token() {
                self.tokens.push(token);
            }
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "EOF",
            self.cursor.line(),
            self.cursor.column(),
        ));
    }

    /// Hands out the next buffered token.
    ///
    /// Past the end of the buffer this keeps returning the EOF token.
    pub fn next(&mut self) -> Token {
        match self.tokens.get(self.next_index) {
            Some(token) => {
                self.next_index += 1;
                token.clone()
            }
            None => self
                .tokens
                .last()
                .cloned()
                .unwrap_or_else(|| Token::new(TokenKind::Eof, "EOF", 1, 0)),
        }
    }

    /// The buffered token list.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Renders the 5-column token table for display.
    pub fn token_table(&self) -> String {
        render_token_table(&self.tokens)
    }

    /// Dispatches on the first character of a token.
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.cursor.current_char();
        if c.is_ascii_alphabetic() || c == '_' {
            Some(self.lex_identifier())
        } else if c.is_ascii_digit() {
            Some(self.lex_number())
        } else {
            self.lex_operator()
        }
    }

    /// Skips runs of whitespace (space, tab, CR, LF) and `//` line
    /// comments. Newlines advance the line counter inside the cursor.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '/' if self.cursor.peek_char(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Reports a lexical error spanning the current token's text.
    pub(crate) fn report_error(&self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_line,
            self.token_column,
        );
        self.handler
            .emit(Diagnostic::new(Category::Lexical, message, span));
    }
}
