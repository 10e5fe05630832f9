//! Expression and condition parsing.
//!
//! The `ExprRest`/`TermRest` productions are realized as loops that fold
//! the operands into a left-leaning tree, which is what makes `+`/`-` and
//! `*`/`/` left-associative.

use minic_lex::TokenKind;

use crate::ast::{BinOp, Expr};
use crate::Parser;

impl<'a, 'src> Parser<'a, 'src> {
    /// `Cond -> Expr RelOp Expr`
    ///
    /// Relational operators are non-associative; exactly one appears here.
    pub(crate) fn parse_condition(&mut self) -> Option<Expr> {
        let left = self.parse_expr()?;

        let op = match self.lookahead().kind {
            TokenKind::Equal => BinOp::Eq,
            TokenKind::NotEqual => BinOp::Ne,
            TokenKind::Less => BinOp::Lt,
            TokenKind::Greater => BinOp::Gt,
            _ => {
                self.syntax_error(
                    "Expected relational operator ('==', '!=', '<', or '>') in condition"
                        .to_string(),
                );
                return None;
            }
        };
        self.advance();

        let right = self.parse_expr()?;
        Some(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `Expr -> Term (('+'|'-') Term)*`
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.lookahead().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Some(left)
    }

    /// `Term -> Factor (('*'|'/') Factor)*`
    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.lookahead().kind {
                TokenKind::Multiply => BinOp::Mul,
                TokenKind::Divide => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Some(left)
    }

    /// `Factor -> '(' Expr ')' | IDENT | INT_LITERAL`
    fn parse_factor(&mut self) -> Option<Expr> {
        match self.lookahead().kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Some(expr)
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Some(Expr::Identifier(token.lexeme))
            }
            TokenKind::IntLiteral => {
                let token = self.advance();
                match token.lexeme.parse::<i32>() {
                    Ok(value) => Some(Expr::IntLiteral(value)),
                    Err(_) => {
                        self.syntax_error_at(
                            format!(
                                "Integer literal '{}' does not fit a 32-bit signed integer",
                                token.lexeme
                            ),
                            &token,
                        );
                        None
                    }
                }
            }
            _ => {
                self.syntax_error(format!(
                    "Expected factor (identifier, integer literal, or '(') but found {} ('{}')",
                    self.lookahead().kind,
                    self.lookahead().lexeme
                ));
                None
            }
        }
    }
}
