//! Built-in tools

pub mod calculator;

pub use calculator::CalculatorTool;
