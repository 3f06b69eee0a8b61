//! Dynamic tool registry
//!
//! Tools register here and the agent queries the registry for definitions
//! and execution, so new tools never require changes to the core loop.
//! Tools are stored as `Arc<dyn Tool>` so lookups hand out cheap clones.

use crate::agent::tool::Tool;
use crate::error::{Result, TutorError};
use crate::llm::chat::{ChatFunction, ChatTool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    /// Create a new, empty tool registry
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a tool in the registry
    pub async fn register_tool(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        tools.insert(tool.name().to_string(), tool);
    }

    /// Unregister a tool by name
    pub async fn unregister_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let mut tools = self.tools.write().await;
        tools.remove(name)
    }

    /// Get a tool by name
    pub async fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub async fn has_tool(&self, name: &str) -> bool {
        let tools = self.tools.read().await;
        tools.contains_key(name)
    }

    /// Get all registered tool names
    pub async fn get_tool_names(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        tools.keys().cloned().collect()
    }

    /// Get all registered tools
    pub async fn get_all_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.values().cloned().collect()
    }

    /// Get tool definitions for the LLM request
    pub async fn get_tool_definitions(&self) -> Vec<ChatTool> {
        let tools = self.tools.read().await;
        tools
            .values()
            .map(|tool| ChatTool {
                type_: "function".to_string(),
                function: ChatFunction {
                    name: tool.name().to_string(),
                    description: Some(tool.description().to_string()),
                    parameters: Some(tool.parameters()),
                },
            })
            .collect()
    }

    /// Execute a tool call with error isolation: a failing tool produces a
    /// typed error, never a panic that takes down the loop.
    pub async fn execute_tool(&self, name: &str, args: &str) -> Result<String> {
        let tool = self
            .get_tool(name)
            .await
            .ok_or_else(|| TutorError::ToolNotFound {
                tool_name: name.to_string(),
            })?;

        match tool.call(args).await {
            Ok(output) => Ok(output),
            Err(e) => Err(TutorError::ToolExecutionFailed {
                tool_name: name.to_string(),
                error: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools::CalculatorTool;

    #[tokio::test]
    async fn test_register_and_lookup() {
        let registry = ToolRegistry::new();
        registry.register_tool(Arc::new(CalculatorTool::new())).await;

        assert!(registry.has_tool("calculator").await);
        assert!(registry.get_tool("calculator").await.is_some());
        assert_eq!(registry.get_tool_names().await, vec!["calculator"]);
    }

    #[tokio::test]
    async fn test_definitions_for_llm() {
        let registry = ToolRegistry::new();
        registry.register_tool(Arc::new(CalculatorTool::new())).await;

        let defs = registry.get_tool_definitions().await;
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].type_, "function");
        assert_eq!(defs[0].function.name, "calculator");
        assert!(defs[0].function.description.is_some());
    }

    #[tokio::test]
    async fn test_execute_tool() {
        let registry = ToolRegistry::new();
        registry.register_tool(Arc::new(CalculatorTool::new())).await;

        let out = registry.execute_tool("calculator", "6 * 7").await.unwrap();
        assert_eq!(out, "Result: 42");

        let err = registry.execute_tool("missing", "1").await.unwrap_err();
        assert!(matches!(err, TutorError::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unregister() {
        let registry = ToolRegistry::new();
        registry.register_tool(Arc::new(CalculatorTool::new())).await;
        assert!(registry.unregister_tool("calculator").await.is_some());
        assert!(!registry.has_tool("calculator").await);
    }
}
