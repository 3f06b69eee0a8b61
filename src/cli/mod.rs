//! CLI argument parsing using clap 4.x derive macros

use clap::{Parser, Subcommand};

/// A terminal tutorial and playground for building LLM agents
///
/// Works with OpenAI-compatible endpoints (OpenAI, Ollama, LM Studio, local
/// models). Ships a guided tutorial, an offline arithmetic evaluator, and a
/// calculator agent you can talk to.
#[derive(Parser, Debug)]
#[command(name = "aitutor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Hide the agent's intermediate thoughts and observations
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print version information
    #[arg(long)]
    pub version: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an arithmetic expression offline (no model, no API key)
    Calc {
        /// The expression, e.g. "2 + 2 * 3"
        expression: String,
    },

    /// Ask the calculator agent a single question
    Ask {
        /// The question, e.g. "What is 25 * 37?"
        query: String,
    },

    /// Run the scripted example queries, then enter interactive mode
    Chat {
        /// Skip the scripted examples and go straight to interactive mode
        #[arg(short, long)]
        skip_examples: bool,
    },

    /// Read the tutorial guide
    Guide {
        /// Page slug (omit to list all pages)
        page: Option<String>,
    },

    /// Show the active configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc() {
        let cli = Cli::parse_from(["aitutor", "calc", "2 + 2"]);
        match cli.command {
            Some(Commands::Calc { expression }) => assert_eq!(expression, "2 + 2"),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_flags() {
        let cli = Cli::parse_from(["aitutor", "chat", "--skip-examples"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Chat {
                skip_examples: true
            })
        ));
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::parse_from(["aitutor", "ask", "-q", "What is 2 + 2?"]);
        assert!(cli.quiet);
    }
}
