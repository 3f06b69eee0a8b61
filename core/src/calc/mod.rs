//! Guarded arithmetic expression evaluator
//!
//! Evaluates user-supplied arithmetic strings without ever handing them to a
//! general-purpose interpreter. Input first passes a fixed character gate,
//! then flows through a closed grammar: tokenizer -> recursive-descent
//! parser -> AST evaluator. The grammar can express nothing beyond the four
//! binary operators, unary sign, parentheses, and decimal literals, so the
//! execution surface is arithmetic-only regardless of what the filter admits.

pub mod eval;
pub mod lexer;
pub mod parser;

pub use eval::eval_expr;
pub use lexer::{tokenize, Token};
pub use parser::{parse, Expr};

use crate::error::TutorError;
use thiserror::Error;

/// Characters an expression may contain. Anything else is rejected before
/// tokenization.
const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Errors produced by the evaluator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Input contained a character outside the allow-set
    #[error("invalid characters in expression")]
    InvalidCharacters,

    /// Division by zero during evaluation
    #[error("division by zero")]
    DivisionByZero,

    /// The expression passed the character gate but is not well-formed
    /// under the arithmetic grammar
    #[error("{0}")]
    Syntax(String),
}

impl From<CalcError> for TutorError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidCharacters => TutorError::InvalidExpression,
            CalcError::DivisionByZero => TutorError::DivisionByZero,
            CalcError::Syntax(message) => TutorError::EvaluationFailed { message },
        }
    }
}

/// Evaluate an arithmetic expression string.
///
/// Pure function of its input: validation, tokenization, parsing and
/// evaluation touch no external state.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    if !input.chars().all(|c| ALLOWED_CHARS.contains(c)) {
        return Err(CalcError::InvalidCharacters);
    }

    let tokens = tokenize(input)?;
    let expr = parse(&tokens)?;
    eval_expr(&expr)
}

/// Format a result the way the calculator tool reports it: integral values
/// without a trailing `.0`, everything else with the default float rendering.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
