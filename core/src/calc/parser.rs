//! Recursive-descent parser for the arithmetic grammar
//!
//! Grammar:
//!   expr    := term (('+' | '-') term)*
//!   term    := factor (('*' | '/') factor)*
//!   factor  := ('+' | '-') factor | primary
//!   primary := NUMBER | '(' expr ')'

use super::lexer::Token;
use super::CalcError;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Arithmetic expression tree. Nothing beyond numbers, sign, and the four
/// binary operators is representable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Parse a token stream into an expression tree.
pub fn parse(tokens: &[Token]) -> Result<Expr, CalcError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(CalcError::Syntax(format!(
            "unexpected token {:?} after expression",
            token
        )));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        while let Some(op) = match self.peek() {
            Some(Token::Plus) => Some(BinOp::Add),
            Some(Token::Minus) => Some(BinOp::Sub),
            _ => None,
        } {
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.factor()?;
        while let Some(op) = match self.peek() {
            Some(Token::Star) => Some(BinOp::Mul),
            Some(Token::Slash) => Some(BinOp::Div),
            _ => None,
        } {
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.factor()?)))
            }
            // Unary plus is a no-op
            Some(Token::Plus) => {
                self.advance();
                self.factor()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(*value)),
            Some(Token::LParen) => {
                let expr = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(expr),
                    Some(token) => Err(CalcError::Syntax(format!(
                        "expected ')', found {:?}",
                        token
                    ))),
                    None => Err(CalcError::Syntax("unbalanced parentheses".to_string())),
                }
            }
            Some(token) => Err(CalcError::Syntax(format!("unexpected token {:?}", token))),
            None => Err(CalcError::Syntax("unexpected end of expression".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::lexer::tokenize;

    fn parse_str(input: &str) -> Result<Expr, CalcError> {
        parse(&tokenize(input).unwrap())
    }

    #[test]
    fn test_precedence_shape() {
        // 2 + 2 * 3 parses as 2 + (2 * 3)
        let expr = parse_str("2 + 2 * 3").unwrap();
        match expr {
            Expr::Binary {
                op: BinOp::Add,
                rhs,
                ..
            } => {
                assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        // 8 - 4 - 2 parses as (8 - 4) - 2
        let expr = parse_str("8 - 4 - 2").unwrap();
        match expr {
            Expr::Binary {
                op: BinOp::Sub,
                lhs,
                rhs,
            } => {
                assert!(matches!(*lhs, Expr::Binary { op: BinOp::Sub, .. }));
                assert_eq!(*rhs, Expr::Number(2.0));
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_operator() {
        assert!(matches!(parse_str("2 +"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(&[]), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(matches!(parse_str("(1 + 2"), Err(CalcError::Syntax(_))));
        assert!(matches!(parse_str("1 + 2)"), Err(CalcError::Syntax(_))));
        assert!(matches!(parse_str("))(("), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_adjacent_numbers_rejected() {
        assert!(matches!(parse_str("1 2"), Err(CalcError::Syntax(_))));
    }
}
