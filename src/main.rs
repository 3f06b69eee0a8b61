//! `aitutor` - a terminal tutorial and playground for building LLM agents
//!
//! This binary renders the tutorial guide, evaluates arithmetic offline,
//! and runs a calculator agent against any OpenAI-compatible endpoint.

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use std::sync::Arc;

use crate::cli::{Cli, Commands};
use aitutor_core::agent::tools::CalculatorTool;
use aitutor_core::agent::{Agent, ToolRegistry};
use aitutor_core::calc;
use aitutor_core::config::{self, Config};
use aitutor_core::guide::{self, GuideRenderer};
use aitutor_core::llm::LlmClient;
use aitutor_core::output::OutputFormatter;
use aitutor_core::TutorError;

mod cli;
mod repl;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    if cli.version {
        let blue = Style::new().blue();
        println!(
            "{} v{} ({})",
            blue.apply_to("aitutor"),
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH")
        );
        return Ok(());
    }

    // File logging under the platform data dir
    if let Some(data_dir) = config::get_data_dir() {
        aitutor_core::logger::init(data_dir);
    }

    // Setup output formatting
    let formatter = OutputFormatter::new();

    // Configuration is loaded per command: `calc` and `guide` work offline
    // and must not fail on a broken aitutor.toml.
    match &cli.command {
        Some(Commands::Calc { expression }) => {
            handle_calc(expression, &formatter);
        }

        Some(Commands::Ask { query }) => {
            let config = Config::load().context("Failed to load configuration")?;
            let mut agent = build_agent(&config, &formatter).await?;
            repl::run_query(&mut agent, &formatter, query, cli.quiet).await;
        }

        Some(Commands::Chat { skip_examples }) => {
            let config = Config::load().context("Failed to load configuration")?;
            let mut agent = build_agent(&config, &formatter).await?;
            show_welcome();
            repl::run(&mut agent, &formatter, cli.quiet, *skip_examples).await?;
        }

        Some(Commands::Guide { page }) => {
            handle_guide(page.as_deref(), &formatter)?;
        }

        Some(Commands::Config) => {
            let config = Config::load().context("Failed to load configuration")?;
            formatter.print_config(&config);
        }

        None => {
            // No command: show the guide index as a starting point
            let renderer = GuideRenderer::new();
            renderer.print_index(guide::all_pages());
        }
    }

    Ok(())
}

/// Evaluate an expression offline and print the outcome. Evaluation errors
/// are recovered locally; they never abort the process.
fn handle_calc(expression: &str, formatter: &OutputFormatter) {
    match calc::evaluate(expression) {
        Ok(value) => formatter.print_calc_result(expression, &calc::format_value(value)),
        Err(e) => formatter.print_error(&e.into()),
    }
}

fn handle_guide(page: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let renderer = GuideRenderer::new();
    match page {
        None => renderer.print_index(guide::all_pages()),
        Some(slug) => match guide::find_page(slug) {
            Some(page) => renderer.print_page(page),
            None => {
                formatter.print_error(&TutorError::InvalidInput {
                    message: format!("unknown guide page '{}'", slug),
                });
                renderer.print_index(guide::all_pages());
            }
        },
    }
    Ok(())
}

/// Build the calculator agent, halting with remediation instructions when
/// the credential is missing.
async fn build_agent(config: &Config, formatter: &OutputFormatter) -> Result<Agent> {
    let llm_config = match config.llm_config() {
        Ok(c) => c,
        Err(e @ TutorError::MissingConfig { .. }) => {
            formatter.print_error(&e);
            println!("{}", config::api_key_remediation());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let client = Arc::new(LlmClient::new(llm_config)?);
    let tools = ToolRegistry::new();
    tools.register_tool(Arc::new(CalculatorTool::new())).await;

    Ok(Agent::new(
        client,
        tools,
        "You are a helpful calculator assistant.".to_string(),
        config.max_iterations,
    ))
}

fn show_welcome() {
    let bold = Style::new().bold();
    println!("{}", bold.apply_to("Simple Calculator Agent"));
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;

    // The offline commands must work with no configuration at all.
    #[test]
    fn test_calc_needs_no_configuration() {
        let formatter = OutputFormatter::new();
        handle_calc("2 + 2", &formatter);
        handle_calc("10 / 0", &formatter);
    }

    #[test]
    fn test_guide_needs_no_configuration() {
        let formatter = OutputFormatter::new();
        handle_guide(None, &formatter).unwrap();
        handle_guide(Some("introduction"), &formatter).unwrap();
        handle_guide(Some("unknown-page"), &formatter).unwrap();
    }
}
