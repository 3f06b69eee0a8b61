//! Tree-walking evaluator for parsed arithmetic expressions

use super::parser::{BinOp, Expr};
use super::CalcError;

/// Evaluate an expression tree.
pub fn eval_expr(expr: &Expr) -> Result<f64, CalcError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Neg(inner) => Ok(-eval_expr(inner)?),
        Expr::Binary { op, lhs, rhs } => {
            let left = eval_expr(lhs)?;
            let right = eval_expr(rhs)?;
            match op {
                BinOp::Add => Ok(left + right),
                BinOp::Sub => Ok(left - right),
                BinOp::Mul => Ok(left * right),
                BinOp::Div => {
                    if right == 0.0 {
                        Err(CalcError::DivisionByZero)
                    } else {
                        Ok(left / right)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_number() {
        assert_eq!(eval_expr(&Expr::Number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_eval_negation() {
        let expr = Expr::Neg(Box::new(Expr::Number(7.0)));
        assert_eq!(eval_expr(&expr), Ok(-7.0));
    }

    #[test]
    fn test_eval_division_by_zero() {
        let expr = Expr::Binary {
            op: BinOp::Div,
            lhs: Box::new(Expr::Number(10.0)),
            rhs: Box::new(Expr::Number(0.0)),
        };
        assert_eq!(eval_expr(&expr), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_eval_nested() {
        // (1 + 2) * 3
        let expr = Expr::Binary {
            op: BinOp::Mul,
            lhs: Box::new(Expr::Binary {
                op: BinOp::Add,
                lhs: Box::new(Expr::Number(1.0)),
                rhs: Box::new(Expr::Number(2.0)),
            }),
            rhs: Box::new(Expr::Number(3.0)),
        };
        assert_eq!(eval_expr(&expr), Ok(9.0));
    }
}
