//! minic-lex - Lexical analysis for the Mini language.
//!
//! The lexer is a deterministic state machine with single-character
//! lookahead (two characters for `==` and `!=`). Unlike an on-demand
//! tokenizer it scans the whole source up front: [`Lexer::run`] fills a
//! buffered token list terminated by exactly one EOF token, and
//! [`Lexer::next`] hands those tokens to the parser, repeating the EOF
//! token once the end is reached. Buffering keeps the token table
//! available for display after parsing has consumed the stream.
//!
//! Lexical errors (unknown characters, a stray `!`) are reported to the
//! shared [`Handler`](minic_util::Handler) and the offending character is
//! skipped so scanning can continue.

pub mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, render_token_table, Token, TokenClass, TokenKind};
