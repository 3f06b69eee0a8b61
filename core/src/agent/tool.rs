use anyhow::Result;
use async_trait::async_trait;

/// A trait for tools that can be executed by the agent.
///
/// Tools are the primary way the agent interacts with the world.
/// Each tool must implement this trait and be `Send + Sync` to be used in
/// the agentic loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name of the tool (e.g., "calculator")
    fn name(&self) -> &str;

    /// A brief description of what the tool does, shown to the model so it
    /// can decide when to invoke it
    fn description(&self) -> &str;

    /// A description of how to use the tool, including parameter format
    fn usage(&self) -> &str;

    /// Optional JSON schema for tool parameters
    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "args": {
                    "type": "string",
                    "description": self.usage()
                }
            },
            "required": ["args"]
        })
    }

    /// Execute the tool with the provided arguments
    async fn call(&self, args: &str) -> Result<String>;
}
