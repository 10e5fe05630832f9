//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// The first character (letter or underscore) has already been seen by
    /// the dispatcher; the run continues over letters, digits and
    /// underscores. Reserved words become keyword tokens.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = keyword_from_ident(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, self.token_line, self.token_column)
    }
}
