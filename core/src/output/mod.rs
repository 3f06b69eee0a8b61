//! Output formatting module
//!
//! Handles formatting and display of agent answers, evaluator results,
//! errors, and configuration using colored output.

use crate::config::Config;
use crate::error::TutorError;
use crate::llm::TokenUsage;
use console::Style;

/// Output formatter for CLI results
pub struct OutputFormatter {
    blue: Style,
    green: Style,
    red: Style,
    bold: Style,
    dim: Style,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self {
            blue: Style::new().blue(),
            green: Style::new().green(),
            red: Style::new().red(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl OutputFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the agent's final answer
    pub fn print_answer(&self, answer: &str, usage: &TokenUsage) {
        println!();
        println!("{} {}", self.green.apply_to("Answer:"), answer);
        if usage.total_tokens > 0 {
            println!("{}", self.blue.apply_to(usage.to_string()));
        }
        println!();
    }

    /// Print an offline evaluator result
    pub fn print_calc_result(&self, expression: &str, value: &str) {
        println!(
            "{} = {}",
            self.dim.apply_to(expression),
            self.bold.apply_to(value)
        );
    }

    /// Print an intermediate thought from the agent
    pub fn print_thought(&self, thought: &str) {
        println!("{}", self.dim.apply_to(thought));
    }

    /// Print a tool observation
    pub fn print_observation(&self, observation: &str) {
        println!(
            "{} {}",
            self.green.apply_to("[Observation]:"),
            observation.trim()
        );
    }

    /// Print an error with its user-facing message
    pub fn print_error(&self, err: &TutorError) {
        println!();
        println!("{} {}", self.red.apply_to("Error:"), err.user_message());
    }

    /// Print the active configuration
    pub fn print_config(&self, config: &Config) {
        println!();
        println!("{}", self.bold.apply_to("Current Configuration:"));
        println!("- Provider: {}", self.green.apply_to(&config.provider));
        println!("- Model: {}", self.green.apply_to(&config.model));
        println!("- Base URL: {}", config.base_url);
        println!("- Max iterations: {}", config.max_iterations);
        let key_status = if config.api_key.is_some() {
            "set"
        } else {
            "not set"
        };
        println!("- API key: {}", key_status);
    }

    /// Print a section banner the way the examples script does
    pub fn print_banner(&self, title: &str) {
        println!();
        println!("{}", "=".repeat(50));
        println!("{}", self.bold.apply_to(title));
        println!("{}", "=".repeat(50));
    }
}
