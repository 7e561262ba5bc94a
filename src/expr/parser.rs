use crate::expr::ast::{BinaryOp, Expr, UnaryOp};
use crate::expr::error::ExprError;
use crate::expr::token::{Token, TokenKind};

const PREC_ADD: u8 = 10;
const PREC_MUL: u8 = 20;
const PREC_UNARY: u8 = 30;
const PREC_POW: u8 = 40;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn from_tokens(tokens: &[Token]) -> Result<Expr, ExprError> {
        let mut parser = Parser::new(tokens.to_vec());
        parser.parse()
    }

    /// Parses one complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ExprError> {
        let expr = self.parse_expr()?;
        if !self.is_eof() {
            return Err(self.error_unexpected());
        }
        Ok(expr)
    }

    fn parse_expr(&mut self) -> Result<Expr, ExprError> {
        self.parse_binary_expr(0)
    }

    // Pratt parser for expressions
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary_expr()?;
        while let Some((op, prec, right_assoc, implicit)) = self.peek_binary_op() {
            if prec < min_prec {
                break;
            }
            if !implicit {
                self.advance(); // consume op
            }
            let next_min_prec = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min_prec)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ExprError> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        self.advance();
        // binds looser than `^`: -2^2 == -(2^2)
        let expr = self.parse_binary_expr(PREC_UNARY)?;
        Ok(Expr::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.current().kind == TokenKind::LParen {
                    self.advance();
                    let args = self.parse_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error_unexpected()),
        }
    }

    /// Arguments after the opening parenthesis, up to and including `)`.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.current().kind == TokenKind::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.current().kind {
                TokenKind::Comma => self.advance(),
                TokenKind::RParen => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.error_unexpected()),
            }
        }
    }

    fn peek_binary_op(&self) -> Option<(BinaryOp, u8, bool, bool)> {
        match self.current().kind {
            TokenKind::Plus => Some((BinaryOp::Add, PREC_ADD, false, false)),
            TokenKind::Minus => Some((BinaryOp::Sub, PREC_ADD, false, false)),
            TokenKind::Star => Some((BinaryOp::Mul, PREC_MUL, false, false)),
            TokenKind::Slash => Some((BinaryOp::Div, PREC_MUL, false, false)),
            TokenKind::Percent => Some((BinaryOp::Mod, PREC_MUL, false, false)),
            TokenKind::Caret => Some((BinaryOp::Pow, PREC_POW, true, false)),
            ref k if k.starts_operand() => Some((BinaryOp::Mul, PREC_MUL, false, true)),
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error_unexpected())
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn is_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn error_unexpected(&self) -> ExprError {
        let cur = self.current();
        match cur.kind {
            TokenKind::Eof => ExprError::UnexpectedEnd,
            ref other => ExprError::UnexpectedToken {
                found: other.clone(),
                pos: cur.pos,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::lex;

    fn parse(src: &str) -> Result<Expr, ExprError> {
        let tokens = lex(src)?;
        Parser::from_tokens(&tokens)
    }

    #[test]
    fn power_is_right_associative() {
        let ast = parse("2^3^2").unwrap();
        let Expr::Binary { op: BinaryOp::Pow, right, .. } = ast else {
            panic!("expected power at the root");
        };
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn implicit_multiplication_before_paren() {
        let ast = parse("2(3)").unwrap();
        assert!(matches!(ast, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn trailing_operator_is_unexpected_end() {
        assert_eq!(parse("2+"), Err(ExprError::UnexpectedEnd));
    }

    #[test]
    fn stray_close_paren_is_rejected() {
        assert!(matches!(
            parse("2)"),
            Err(ExprError::UnexpectedToken { found: TokenKind::RParen, pos: 1 })
        ));
    }
}
