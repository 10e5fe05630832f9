//! Token definitions for the Mini language.

use std::fmt;

/// The name tag of a token. The set is closed; every character of valid
/// Mini source belongs to exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    If,
    Else,
    While,
    Print,

    // Identifiers and literals
    Identifier,
    IntLiteral,

    // Operators
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    Greater,

    // Punctuation
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Special
    Eof,
    Unknown,
}

impl TokenKind {
    /// Uppercase display name, as shown in the token table.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Print => "PRINT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown => "UNKNOWN",
        }
    }

    /// Broad class of the token.
    pub const fn class(self) -> TokenClass {
        match self {
            TokenKind::Int
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::Print => TokenClass::Keyword,
            TokenKind::Identifier => TokenClass::Identifier,
            TokenKind::IntLiteral => TokenClass::Literal,
            TokenKind::Assign
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::Greater => TokenClass::Operator,
            TokenKind::Semicolon
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace => TokenClass::Punctuation,
            TokenKind::Eof => TokenClass::EndOfFile,
            TokenKind::Unknown => TokenClass::Unknown,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Broad token classification, the second tag every token carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Literal,
    Identifier,
    Operator,
    Punctuation,
    EndOfFile,
    Unknown,
}

impl TokenClass {
    /// Uppercase display name, as shown in the token table.
    pub const fn name(self) -> &'static str {
        match self {
            TokenClass::Keyword => "KEYWORD",
            TokenClass::Literal => "LITERAL",
            TokenClass::Identifier => "IDENTIFIER",
            TokenClass::Operator => "OPERATOR",
            TokenClass::Punctuation => "PUNCTUATION",
            TokenClass::EndOfFile => "END_OF_FILE",
            TokenClass::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps reserved words to their keyword kinds.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    match text {
        "int" => Some(TokenKind::Int),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "print" => Some(TokenKind::Print),
        _ => None,
    }
}

/// A lexical unit: kind, source text, and coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token.
    pub lexeme: String,
    /// Line the token starts on (1-based).
    pub line: u32,
    /// Byte column within that line (0-based).
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Broad class of this token, derived from its kind.
    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }
}

/// Renders the human-readable token table: line, column, token name,
/// token class, lexeme.
pub fn render_token_table(tokens: &[Token]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>4}  {:<12} {:<12} {}\n",
        "LINE", "COL", "NAME", "CLASS", "LEXEME"
    ));
    for token in tokens {
        out.push_str(&format!(
            "{:>5} {:>4}  {:<12} {:<12} {}\n",
            token.line,
            token.column,
            token.kind.name(),
            token.class().name(),
            token.lexeme
        ));
    }
    out
}
