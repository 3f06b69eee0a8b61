//! Interactive calculator-agent session
//!
//! Runs the scripted example queries first, then drops into a
//! read-print loop. One evaluation per input; the loop blocks on the
//! console between calls.

use aitutor_core::agent::{Agent, AgentEvent};
use aitutor_core::output::OutputFormatter;
use anyhow::Result;
use console::Style;
use dialoguer::{theme::ColorfulTheme, Input};

/// The scripted queries shown before interactive mode
const EXAMPLE_QUERIES: &[&str] = &[
    "What is 25 * 37?",
    "Calculate 100 divided by 4",
    "What's 15 plus 23 minus 8?",
    "Compute 2 to the power of 10",
];

/// Run the example queries, then the interactive loop.
pub async fn run(agent: &mut Agent, formatter: &OutputFormatter, quiet: bool, skip_examples: bool) -> Result<()> {
    if !skip_examples {
        run_examples(agent, formatter, quiet).await;
    }

    formatter.print_banner("Interactive Mode");
    println!("Type 'quit' or 'exit' to stop\n");

    let theme = ColorfulTheme::default();
    loop {
        let input: String = match Input::with_theme(&theme)
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // EOF or interrupt ends the session
            Err(_) => {
                println!("\nGoodbye!");
                break;
            }
        };

        let input = input.trim().to_string();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\nGoodbye!");
            break;
        }

        run_one(agent, formatter, &input, quiet).await;
    }

    Ok(())
}

async fn run_examples(agent: &mut Agent, formatter: &OutputFormatter, quiet: bool) {
    println!("\nRunning example queries:");

    for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
        formatter.print_banner(&format!("Example {}: {}", i + 1, query));
        run_one(agent, formatter, query, quiet).await;
    }
}

/// Run a single query and print the outcome (used by `ask`).
pub async fn run_query(agent: &mut Agent, formatter: &OutputFormatter, query: &str, quiet: bool) {
    run_one(agent, formatter, query, quiet).await;
}

async fn run_one(agent: &mut Agent, formatter: &OutputFormatter, query: &str, quiet: bool) {
    let status = Style::new().dim();
    let on_event = |event: AgentEvent| {
        if quiet {
            return;
        }
        match event {
            AgentEvent::Status(msg) => {
                if !msg.is_empty() {
                    println!("{}", status.apply_to(msg));
                }
            }
            AgentEvent::Thought(thought) => formatter.print_thought(&thought),
            AgentEvent::Observation(obs) => formatter.print_observation(&obs),
        }
    };

    match agent.run(query, &on_event).await {
        Ok((answer, usage)) => formatter.print_answer(&answer, &usage),
        Err(e) => formatter.print_error(&e),
    }
}
