//! Agent runtime
//!
//! A small agentic loop: the model reasons, picks a tool, we execute it and
//! feed the observation back until a final answer emerges.

pub mod core;
pub mod registry;
pub mod tool;
pub mod tools;

pub use self::core::{Agent, AgentDecision, AgentEvent};
pub use registry::ToolRegistry;
pub use tool::Tool;
