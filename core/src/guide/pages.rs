//! Static guide content

use super::{Page, Section};

pub(super) const PAGES: &[Page] = &[INTRODUCTION, PREREQUISITES, DEVELOPMENT, EXAMPLES, DEPLOYMENT];

const INTRODUCTION: Page = Page {
    slug: "introduction",
    title: "Introduction: What is an AI Agent?",
    summary: "Core concepts, architecture, and the main types of agents",
    sections: &[
        Section::Heading("Understanding AI Agents"),
        Section::Paragraph(
            "An AI agent is an autonomous program that perceives its environment \
            through inputs (data, APIs, user queries), makes decisions based on \
            goals, takes actions to achieve those goals, and in some cases adapts \
            from feedback.",
        ),
        Section::Bullets(&[
            "Autonomy: operates without constant human intervention",
            "Reactivity: responds to changes in the environment",
            "Pro-activeness: takes initiative to achieve goals",
            "Social ability: can interact with other agents, systems, or humans",
        ]),
        Section::Heading("Agent Components"),
        Section::Bullets(&[
            "Sensors (input): text input, APIs, databases, files",
            "Processor (brain): an LLM such as GPT-4, Claude, or Llama",
            "Actuators (output): API calls, file operations, tool execution",
            "Memory: short-term (conversation) and long-term (vector stores)",
            "Tools: web search, calculators, code execution, API calls",
        ]),
        Section::Heading("Agent vs Traditional Program"),
        Section::Code {
            lang: "text",
            text: "Traditional: Input -> Fixed Logic -> Output\n\
                   Agent:       Input -> Reasoning/Planning -> Tool Selection ->\n\
                   \x20            Action -> Observation -> Adaptation -> Goal",
        },
        Section::Note(
            "Key difference: agents use reasoning and can adapt their approach to \
            the situation, while traditional programs follow fixed logic.",
        ),
        Section::Heading("Types of AI Agents"),
        Section::Bullets(&[
            "Simple reflex agents: react to the current state only (a thermostat)",
            "Model-based agents: keep an internal model of the world (game players)",
            "Goal-based agents: plan actions toward specific goals (task agents)",
            "Utility-based agents: maximize a utility function (trading bots)",
            "Learning agents: improve from feedback over time",
        ]),
    ],
};

const PREREQUISITES: Page = Page {
    slug: "prerequisites",
    title: "Prerequisites & Setup",
    summary: "Everything needed before building and running agents",
    sections: &[
        Section::Heading("System Requirements"),
        Section::Bullets(&[
            "Any 64-bit Linux, macOS, or Windows machine; 4 GB RAM minimum",
            "8 GB+ RAM recommended when running local models via Ollama",
            "A stable network connection for hosted providers",
        ]),
        Section::Heading("Toolchain"),
        Section::Paragraph(
            "Install a recent stable Rust toolchain, then build the project with \
            cargo. No other system packages are required.",
        ),
        Section::Code {
            lang: "sh",
            text: "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh\n\
                   cargo build --release",
        },
        Section::Heading("API Keys"),
        Section::Paragraph(
            "Hosted providers require a credential. The key is read from the \
            environment at startup; without it the agent commands refuse to run.",
        ),
        Section::Code {
            lang: "sh",
            text: "export OPENAI_API_KEY='your-key-here'",
        },
        Section::Note(
            "Never commit API keys to version control. Prefer the environment or \
            a local aitutor.toml kept out of the repository.",
        ),
        Section::Heading("Local Models (optional)"),
        Section::Paragraph(
            "Any OpenAI-compatible endpoint works: Ollama, LM Studio, and most \
            self-hosted inference servers. Point base_url at the local server and \
            pick an installed model.",
        ),
        Section::Code {
            lang: "toml",
            text: "# aitutor.toml\nprovider = \"ollama\"\nbase_url = \"http://localhost:11434/v1\"\nmodel = \"llama3\"",
        },
    ],
};

const DEVELOPMENT: Page = Page {
    slug: "development",
    title: "Agent Development Guide",
    summary: "A step-by-step process for building your own agent",
    sections: &[
        Section::Heading("Architecture Overview"),
        Section::Paragraph(
            "User input flows to the model together with a system prompt that \
            describes the available tools. The model either answers directly or \
            requests a tool; the tool result is fed back as an observation and \
            the cycle repeats until a final answer emerges.",
        ),
        Section::Heading("Step-by-Step Process"),
        Section::Bullets(&[
            "1. Define the agent's purpose: one clear job, not ten vague ones",
            "2. Choose the model and endpoint it will reason with",
            "3. Set up tools: name, description, and a strict input contract",
            "4. Initialize the agent with the tools and an iteration cap",
            "5. Add memory or context only when the task actually needs it",
            "6. Implement error handling: tools fail, networks fail, models ramble",
            "7. Test with scripted queries before going interactive",
        ]),
        Section::Heading("Best Practices"),
        Section::Bullets(&[
            "DO write precise tool descriptions; the model chooses tools by them",
            "DO cap iterations and detect repeated identical tool calls",
            "DO validate tool input before acting on it",
            "DON'T let a tool evaluate arbitrary code on the model's behalf",
            "DON'T assume the model's output is well-formed; parse defensively",
        ]),
        Section::Heading("Debugging Tips"),
        Section::Bullets(&[
            "Log every request, tool call, and observation to the log file",
            "Reproduce failures with `calc` before blaming the model",
            "Temperature 0 makes runs repeatable while debugging",
        ]),
        Section::Note(
            "The calculator tool in this project is a worked example of the tool \
            contract: a closed grammar the model cannot talk its way out of.",
        ),
    ],
};

const EXAMPLES: Page = Page {
    slug: "examples",
    title: "Agent Examples",
    summary: "Working examples you can run from this binary",
    sections: &[
        Section::Heading("Calculator Agent"),
        Section::Paragraph(
            "A minimal agent with a single arithmetic tool. The model receives \
            the question, decides to call the calculator, reads the observation, \
            and produces a final answer.",
        ),
        Section::Code {
            lang: "sh",
            text: "aitutor ask \"What is 25 * 37?\"\naitutor chat   # scripted examples, then interactive mode",
        },
        Section::Heading("The Tool Behind It"),
        Section::Paragraph(
            "The calculator validates input against the character set \
            0-9 + - * / ( ) . space, then parses it with an arithmetic-only \
            grammar. Anything else is rejected before evaluation.",
        ),
        Section::Code {
            lang: "text",
            text: "You: What is 100 divided by 4?\n\
                   Thought: I need to divide 100 by 4 using the calculator.\n\
                   Action: calculator\n\
                   Action Input: 100 / 4\n\
                   Observation: Result: 25\n\
                   Final Answer: 100 divided by 4 is 25.",
        },
        Section::Heading("Offline Evaluation"),
        Section::Paragraph(
            "The evaluator also works without any model or API key, which is \
            useful for testing the tool contract in isolation.",
        ),
        Section::Code {
            lang: "sh",
            text: "aitutor calc \"2 + 2 * 3\"\naitutor calc \"10 / 0\"   # reports division by zero, never crashes",
        },
        Section::Note(
            "Ideas to extend: a unit-conversion tool, a date calculator, or a \
            second agent that checks the first one's arithmetic.",
        ),
    ],
};

const DEPLOYMENT: Page = Page {
    slug: "deployment",
    title: "Deployment Guide",
    summary: "Options for running agents outside your terminal",
    sections: &[
        Section::Heading("Deployment Options"),
        Section::Bullets(&[
            "Single binary: `cargo build --release` produces one static-ish \
             executable; copy it to the target host",
            "Docker: smallest images come from a multi-stage build",
            "Local server: run under systemd for internal tools",
            "Behind an API: wrap the agent in an HTTP service when other \
             programs need it",
        ]),
        Section::Heading("Docker"),
        Section::Code {
            lang: "dockerfile",
            text: "FROM rust:1.79 AS build\nWORKDIR /app\nCOPY . .\nRUN cargo build --release\n\n\
                   FROM debian:bookworm-slim\nCOPY --from=build /app/target/release/aitutor /usr/local/bin/\nENTRYPOINT [\"aitutor\"]",
        },
        Section::Heading("Configuration in Production"),
        Section::Bullets(&[
            "Inject the API key through the environment, never the image",
            "Pin the model name in aitutor.toml so deploys are reproducible",
            "Ship the log directory somewhere persistent if you need an audit trail",
        ]),
        Section::Heading("Operational Concerns"),
        Section::Bullets(&[
            "Rate limits: the client retries 429s with backoff, but budget for them",
            "Cost: token usage is printed after every run; watch it",
            "Timeouts: hosted providers occasionally stall; the client caps requests at two minutes",
        ]),
        Section::Note(
            "Start with the single binary. Add infrastructure only when something \
            concrete demands it.",
        ),
    ],
};
