//! Statement parsing: declarations, assignments, print, if, while.

use minic_lex::TokenKind;

use crate::ast::{Program, Stmt, TypeTag};
use crate::Parser;

impl<'a, 'src> Parser<'a, 'src> {
    /// `StmtList -> Stmt StmtList | eps` with FOLLOW = `}` or EOF.
    pub(crate) fn parse_stmt_list(&mut self) -> Option<Program> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.parse_stmt()?);
        }
        Some(Program { statements })
    }

    /// Dispatches on FIRST(Stmt) = { `int`, IDENT, `print`, `if`, `while` }.
    fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.lookahead().kind {
            TokenKind::Int => self.parse_var_decl(),
            TokenKind::Identifier => self.parse_assign(),
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            _ => {
                self.syntax_error(format!(
                    "Expected statement (int, identifier, print, if, or while) but found {} ('{}')",
                    self.lookahead().kind,
                    self.lookahead().lexeme
                ));
                None
            }
        }
    }

    /// `Stmt -> 'int' IDENT ';'`
    fn parse_var_decl(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Int)?;
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::Semicolon)?;
        Some(Stmt::VarDecl {
            name,
            ty: TypeTag::Int,
        })
    }

    /// `Stmt -> IDENT '=' Expr ';'`
    fn parse_assign(&mut self) -> Option<Stmt> {
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Some(Stmt::Assign { name, value })
    }

    /// `Stmt -> 'print' Expr ';'`
    fn parse_print(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Print)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Some(Stmt::Print(value))
    }

    /// `Stmt -> 'if' '(' Cond ')' '{' StmtList '}' ElseOpt`
    ///
    /// Bodies must be brace-delimited even when single-statement.
    fn parse_if(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;
        let then_body = self.parse_stmt_list()?;
        self.expect(TokenKind::RBrace)?;
        let else_body = self.parse_else_opt()?;
        Some(Stmt::If {
            condition,
            then_body,
            else_body,
        })
    }

    /// `ElseOpt -> 'else' '{' StmtList '}' | eps`
    fn parse_else_opt(&mut self) -> Option<Option<Program>> {
        if !self.check(TokenKind::Else) {
            return Some(None);
        }
        self.advance();
        self.expect(TokenKind::LBrace)?;
        let body = self.parse_stmt_list()?;
        self.expect(TokenKind::RBrace)?;
        Some(Some(body))
    }

    /// `Stmt -> 'while' '(' Cond ')' '{' StmtList '}'`
    fn parse_while(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;
        let body = self.parse_stmt_list()?;
        self.expect(TokenKind::RBrace)?;
        Some(Stmt::While { condition, body })
    }
}
