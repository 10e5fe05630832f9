//! minic-par - Recursive-descent parser for the Mini language.
//!
//! The grammar is LL(1): the parser holds exactly one lookahead token
//! pulled from the lexer's buffered stream and decides every production
//! from it. Precedence falls out of the grammar stratification - `*` and
//! `/` bind tighter than `+` and `-`, both tiers fold left, and a
//! relational operator appears exactly once, inside a condition.
//!
//! There is no token-level error recovery: the first mismatch records a
//! Syntax diagnostic at the lookahead's coordinates and the parse unwinds
//! through the `Option` returns.

pub mod ast;
mod expr;
mod stmt;

use minic_lex::{Lexer, Token, TokenKind};
use minic_util::{Diagnostic, Handler};

use ast::Program;

/// Recursive-descent parser over a lexer's token stream.
pub struct Parser<'a, 'src> {
    lexer: &'a mut Lexer<'src>,
    handler: &'a Handler,
    lookahead: Token,
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Creates a parser and primes the lookahead token.
    pub fn new(lexer: &'a mut Lexer<'src>, handler: &'a Handler) -> Self {
        let lookahead = lexer.next();
        Self {
            lexer,
            handler,
            lookahead,
        }
    }

    /// Parses a whole program: `P -> StmtList EOF`.
    ///
    /// Returns `None` when a syntax error was recorded; the sink then
    /// holds exactly the first syntactic fault.
    pub fn parse(&mut self) -> Option<Program> {
        let program = self.parse_stmt_list()?;
        self.expect(TokenKind::Eof)?;
        Some(program)
    }

    /// The current lookahead token.
    pub(crate) fn lookahead(&self) -> &Token {
        &self.lookahead
    }

    /// Returns true if the lookahead has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    /// Consumes the lookahead and pulls the next token from the lexer.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next();
        std::mem::replace(&mut self.lookahead, next)
    }

    /// Consumes the lookahead when it matches `kind`; otherwise records a
    /// syntax error and aborts the parse.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.syntax_error(format!(
                "Expected token {} but found {} ('{}')",
                kind, self.lookahead.kind, self.lookahead.lexeme
            ));
            None
        }
    }

    /// Records a syntax error at the lookahead's coordinates.
    pub(crate) fn syntax_error(&self, message: String) {
        self.handler.emit(Diagnostic::syntax(
            message,
            self.lookahead.line,
            self.lookahead.column,
        ));
    }

    /// Records a syntax error at an explicit token's coordinates.
    pub(crate) fn syntax_error_at(&self, message: String, token: &Token) {
        self.handler
            .emit(Diagnostic::syntax(message, token.line, token.column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{BinOp, Expr, Stmt};
    use minic_util::Category;

    fn parse_source(source: &str) -> (Option<Program>, Handler) {
        let handler = Handler::new();
        let program = {
            let mut lexer = Lexer::new(source, &handler);
            lexer.run();
            let mut parser = Parser::new(&mut lexer, &handler);
            parser.parse()
        };
        (program, handler)
    }

    #[test]
    fn test_empty_source_is_empty_program() {
        let (program, handler) = parse_source("");
        assert_eq!(program, Some(Program::default()));
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_declaration_assignment_print() {
        let (program, handler) = parse_source("int x; x = 5; print x;");
        assert!(!handler.has_errors());
        let program = program.unwrap();
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(&program.statements[0], Stmt::VarDecl { name, .. } if name == "x"));
        assert!(matches!(&program.statements[1], Stmt::Assign { name, .. } if name == "x"));
        assert!(matches!(&program.statements[2], Stmt::Print(_)));
    }

    #[test]
    fn test_precedence_multiplication_binds_tighter() {
        let (program, _) = parse_source("x = 2 + 3 * 4;");
        let program = program.unwrap();
        let Stmt::Assign { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        // 2 + (3 * 4)
        let Expr::Binary { op, left, right } = value else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Add);
        assert_eq!(**left, Expr::IntLiteral(2));
        assert!(matches!(&**right, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let (program, _) = parse_source("x = (2 + 3) * 4;");
        let program = program.unwrap();
        let Stmt::Assign { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        let Expr::Binary { op, left, .. } = value else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Mul);
        assert!(matches!(&**left, Expr::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_left_associativity() {
        let (program, _) = parse_source("x = 10 - 4 - 3;");
        let program = program.unwrap();
        let Stmt::Assign { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        // (10 - 4) - 3
        let Expr::Binary { op, left, right } = value else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Sub);
        assert_eq!(**right, Expr::IntLiteral(3));
        assert!(matches!(&**left, Expr::Binary { op: BinOp::Sub, .. }));
    }

    #[test]
    fn test_division_shares_term_tier() {
        let (program, _) = parse_source("x = 8 / 2 * 3;");
        let program = program.unwrap();
        let Stmt::Assign { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        // (8 / 2) * 3
        let Expr::Binary { op, left, .. } = value else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinOp::Mul);
        assert!(matches!(&**left, Expr::Binary { op: BinOp::Div, .. }));
    }

    #[test]
    fn test_if_with_else() {
        let (program, handler) = parse_source("if (a < 10) { print 1; } else { print 2; }");
        assert!(!handler.has_errors());
        let program = program.unwrap();
        let Stmt::If {
            condition,
            then_body,
            else_body,
        } = &program.statements[0]
        else {
            panic!("expected if statement");
        };
        assert!(matches!(condition, Expr::Binary { op: BinOp::Lt, .. }));
        assert_eq!(then_body.statements.len(), 1);
        assert_eq!(else_body.as_ref().unwrap().statements.len(), 1);
    }

    #[test]
    fn test_if_without_else() {
        let (program, _) = parse_source("if (a == 1) { print 1; }");
        let program = program.unwrap();
        let Stmt::If { else_body, .. } = &program.statements[0] else {
            panic!("expected if statement");
        };
        assert!(else_body.is_none());
    }

    #[test]
    fn test_empty_block_parses_to_empty_program() {
        let (program, handler) = parse_source("while (i < 3) { }");
        assert!(!handler.has_errors());
        let program = program.unwrap();
        let Stmt::While { body, .. } = &program.statements[0] else {
            panic!("expected while statement");
        };
        assert!(body.is_empty());
    }

    #[test]
    fn test_nested_blocks_to_depth_100() {
        let mut source = String::new();
        source.push_str("int n; n = 1;\n");
        for _ in 0..100 {
            source.push_str("if (n == 1) {\n");
        }
        source.push_str("print n;\n");
        for _ in 0..100 {
            source.push('}');
        }
        let (program, handler) = parse_source(&source);
        assert!(!handler.has_errors());
        assert!(program.is_some());
    }

    #[test]
    fn test_missing_semicolon_is_syntax_error() {
        let (program, handler) = parse_source("int x");
        assert!(program.is_none());
        assert_eq!(handler.first_category(), Some(Category::Syntax));
        let diag = &handler.diagnostics()[0];
        assert!(diag.message.contains("SEMICOLON"));
    }

    #[test]
    fn test_first_error_aborts_parse() {
        // Both statements are malformed; only the first is reported.
        let (program, handler) = parse_source("int ; int ;");
        assert!(program.is_none());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn test_condition_requires_relational_operator() {
        let (program, handler) = parse_source("if (a + 1) { print a; }");
        assert!(program.is_none());
        assert!(handler.diagnostics()[0]
            .message
            .contains("relational operator"));
    }

    #[test]
    fn test_bodies_must_be_braced() {
        let (program, handler) = parse_source("if (a < 1) print a;");
        assert!(program.is_none());
        assert_eq!(handler.first_category(), Some(Category::Syntax));
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let (program, handler) = parse_source("int x; }");
        assert!(program.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn test_error_coordinates_point_at_lookahead() {
        let (_, handler) = parse_source("int x;\nx = ;");
        let diag = &handler.diagnostics()[0];
        assert_eq!(diag.line(), 2);
        assert_eq!(diag.column(), 4);
    }

    #[test]
    fn test_out_of_range_literal_is_syntax_error() {
        let (program, handler) = parse_source("x = 99999999999;");
        assert!(program.is_none());
        assert_eq!(handler.first_category(), Some(Category::Syntax));
        assert!(handler.diagnostics()[0].message.contains("32-bit"));
    }

    #[test]
    fn test_i32_boundary_literal_parses() {
        let (program, handler) = parse_source("x = 2147483647;");
        assert!(!handler.has_errors());
        let program = program.unwrap();
        let Stmt::Assign { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        assert_eq!(*value, Expr::IntLiteral(i32::MAX));
    }
}
