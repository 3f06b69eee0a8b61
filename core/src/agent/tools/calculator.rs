//! Calculator tool backed by the guarded expression evaluator
//!
//! Both successes and failures are reported as observation strings so the
//! model can read the outcome and correct its input; the tool itself never
//! fails the agent loop.

use crate::agent::tool::Tool;
use crate::calc::{self, CalcError};
use anyhow::Result;
use async_trait::async_trait;

pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }

    fn evaluate(&self, expression: &str) -> String {
        match calc::evaluate(expression) {
            Ok(value) => format!("Result: {}", calc::format_value(value)),
            Err(CalcError::InvalidCharacters) => {
                "Error: Invalid characters in expression".to_string()
            }
            Err(CalcError::DivisionByZero) => "Error: Division by zero".to_string(),
            Err(CalcError::Syntax(message)) => format!("Error: {}", message),
        }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluates mathematical expressions. Input should be a valid expression \
        like '2 + 2' or '10 * 5 / 2'"
    }

    fn usage(&self) -> &str {
        "An arithmetic expression using digits, + - * /, parentheses and decimal points"
    }

    async fn call(&self, args: &str) -> Result<String> {
        Ok(self.evaluate(args.trim()))
    }
}
