//! Integer literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a run of decimal digits into an `INT_LITERAL` token.
    ///
    /// The token carries the raw digit text; the parser converts it and
    /// checks the 32-bit range, where an over-long literal can be reported
    /// with the literal's own coordinates.
    pub(crate) fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        Token::new(TokenKind::IntLiteral, text, self.token_line, self.token_column)
    }
}
