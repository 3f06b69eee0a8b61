//! Agent core implementation
//!
//! Drives the reason/act loop: ask the model, execute the tool it picked,
//! feed the observation back, stop on a final answer. Supports both native
//! tool calls and the textual ReAct format as a fallback for endpoints
//! without tool-calling support.

use crate::agent::registry::ToolRegistry;
use crate::error::{Result, TutorError};
use crate::info_log;
use crate::llm::{
    chat::{ChatMessage, ChatRequest, MessageRole},
    LlmClient, TokenUsage,
};
use regex::Regex;
use std::sync::Arc;

/// The decision made by the agent after a step.
#[derive(Debug, Clone)]
pub enum AgentDecision {
    /// The LLM produced a text response (final answer or question).
    Message(String, TokenUsage),
    /// The LLM wants to execute a tool.
    Action { tool: String, args: String },
    /// The agent has reached maximum iterations or an error occurred.
    Error(String),
}

/// Progress notifications emitted while the loop runs, for the CLI to print.
#[derive(Debug, Clone)]
pub enum AgentEvent {
    Status(String),
    Thought(String),
    Observation(String),
}

/// The core Agent that manages the agentic loop. Tools live in a
/// `ToolRegistry`; the loop itself never changes when a tool is added.
pub struct Agent {
    pub llm_client: Arc<LlmClient>,
    pub tools: ToolRegistry,
    pub max_iterations: usize,
    pub system_prompt_prefix: String,

    // State maintained between steps
    pub history: Vec<ChatMessage>,
    pub iteration_count: usize,
    pub total_usage: TokenUsage,
    pending_decision: Option<AgentDecision>,

    /// Native tool call awaiting its result, as (call id, tool name)
    pending_tool_call: Option<(String, String)>,

    // Safety tracking
    last_tool_call: Option<(String, String)>,
    repetition_count: usize,

    /// Approximate token budget for the conversation window
    context_limit: usize,
}

impl Agent {
    pub fn new(
        client: Arc<LlmClient>,
        tools: ToolRegistry,
        system_prompt_prefix: String,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm_client: client,
            tools,
            max_iterations,
            system_prompt_prefix,
            history: Vec::new(),
            iteration_count: 0,
            total_usage: TokenUsage::default(),
            pending_decision: None,
            pending_tool_call: None,
            last_tool_call: None,
            repetition_count: 0,
            context_limit: 16_000,
        }
    }

    /// Check if the agent has a pending decision to be returned.
    pub fn has_pending_decision(&self) -> bool {
        self.pending_decision.is_some()
    }

    /// Reset the agent's state for a new task.
    pub async fn reset(&mut self, history: Vec<ChatMessage>) {
        self.history = history;
        self.iteration_count = 0;
        self.total_usage = TokenUsage::default();
        self.pending_decision = None;
        self.pending_tool_call = None;
        self.last_tool_call = None;
        self.repetition_count = 0;

        // Ensure system prompt is present
        if self.history.is_empty() || self.history[0].role != MessageRole::System {
            let prompt = self.generate_system_prompt().await;
            self.history.insert(0, ChatMessage::system(prompt));
        }
    }

    /// Perform a single step in the agentic loop.
    pub async fn step(&mut self, observation: Option<String>) -> Result<AgentDecision> {
        // Hard iteration limit
        if self.iteration_count >= self.max_iterations {
            return Ok(AgentDecision::Error(format!(
                "Maximum iteration limit ({}) reached. Task aborted to prevent infinite loop.",
                self.max_iterations
            )));
        }

        // Return pending decision if we have one (an Action queued after a Thought)
        if let Some(decision) = self.pending_decision.take() {
            return Ok(decision);
        }

        if let Some(obs) = observation {
            self.push_observation(obs);
        }

        // Reserve space for the response before pruning
        let response_reserve = self.llm_client.config().max_tokens.unwrap_or(1000) as usize;
        let limit = self.context_limit.saturating_sub(response_reserve);
        self.history = prune_history(std::mem::take(&mut self.history), limit);

        let mut request = ChatRequest::new(
            self.llm_client.model().to_string(),
            self.history.clone(),
        );

        let chat_tools = self.tools.get_tool_definitions().await;
        if !chat_tools.is_empty() {
            request = request.with_tools(chat_tools);
        }

        let response = self.llm_client.chat(&request).await?;
        let content = response.content();

        if let Some(usage) = &response.usage {
            self.total_usage.prompt_tokens += usage.prompt_tokens;
            self.total_usage.completion_tokens += usage.completion_tokens;
            self.total_usage.total_tokens += usage.total_tokens;
        }

        self.iteration_count += 1;

        // 1. Native tool calls
        if let Some(tool_calls) = response
            .choices
            .first()
            .and_then(|c| c.message.tool_calls.as_ref())
        {
            if let Some(tool_call) = tool_calls.first() {
                let tool_name = tool_call.function.name.trim().to_string();
                let args = tool_call.function.arguments.clone();

                if let Some(error) = self.track_repetition(&tool_name, &args) {
                    return Ok(error);
                }

                self.history.push(response.choices[0].message.clone());
                self.pending_tool_call = Some((tool_call.id.clone(), tool_name.clone()));

                let action = AgentDecision::Action {
                    tool: tool_name,
                    args,
                };

                // The model may also emit text content (a Thought)
                if !content.trim().is_empty() {
                    self.pending_decision = Some(action);
                    return Ok(AgentDecision::Message(content, self.total_usage.clone()));
                }

                return Ok(action);
            }
        }

        // 2. ReAct format fallback
        if let Some((tool_name, args)) = parse_react_action(&content) {
            if let Some(error) = self.track_repetition(&tool_name, &args) {
                return Ok(error);
            }

            // A Final Answer in the same message wins over the action
            if content.contains("Final Answer:") {
                self.history.push(ChatMessage::assistant(content.clone()));
                return Ok(AgentDecision::Message(content, self.total_usage.clone()));
            }

            self.history.push(ChatMessage::assistant(content.clone()));

            let action_decision = AgentDecision::Action {
                tool: tool_name,
                args,
            };

            // Everything before "Action:" is the Thought
            if let Some(pos) = content.find("Action:") {
                let thought = content[..pos].trim().to_string();
                if !thought.is_empty() {
                    self.pending_decision = Some(action_decision);
                    return Ok(AgentDecision::Message(thought, self.total_usage.clone()));
                }
            }

            return Ok(action_decision);
        }

        // 3. Final answer or plain message
        self.history.push(ChatMessage::assistant(content.clone()));
        Ok(AgentDecision::Message(content, self.total_usage.clone()))
    }

    /// Append a tool result to the history. After a native tool call the
    /// result must go back as a `tool` role message carrying the call id;
    /// strict endpoints reject a plain user message in that position.
    fn push_observation(&mut self, obs: String) {
        match self.pending_tool_call.take() {
            Some((call_id, tool_name)) => {
                self.history.push(ChatMessage::tool(call_id, tool_name, obs));
            }
            None => {
                self.history
                    .push(ChatMessage::user(format!("Observation: {}", obs)));
            }
        }
    }

    fn track_repetition(&mut self, tool_name: &str, args: &str) -> Option<AgentDecision> {
        if let Some((last_tool, last_args)) = &self.last_tool_call {
            if last_tool == tool_name && last_args == args {
                self.repetition_count += 1;
                if self.repetition_count >= 3 {
                    return Some(AgentDecision::Error(format!(
                        "Detected repeated tool call to '{}' with identical arguments. Breaking loop.",
                        tool_name
                    )));
                }
            } else {
                self.repetition_count = 0;
            }
        }
        self.last_tool_call = Some((tool_name.to_string(), args.to_string()));
        None
    }

    /// Run a query to completion, emitting progress through `on_event`.
    pub async fn run(
        &mut self,
        query: &str,
        on_event: &dyn Fn(AgentEvent),
    ) -> Result<(String, TokenUsage)> {
        info_log!("Agent run: {}", query);
        self.reset(vec![ChatMessage::user(query)]).await;

        let mut last_observation = None;
        let max_driver_loops = self.max_iterations * 2 + 4;
        let mut loop_iteration = 0;

        loop {
            loop_iteration += 1;
            if loop_iteration > max_driver_loops {
                return Err(TutorError::AgentStopped {
                    reason: format!(
                        "driver-level safety limit reached ({} loops)",
                        max_driver_loops
                    ),
                });
            }

            on_event(AgentEvent::Status("Thinking...".to_string()));

            match self.step(last_observation.take()).await? {
                AgentDecision::Message(msg, usage) => {
                    // A pending decision means the message was only a Thought;
                    // execute the queued action next.
                    if self.has_pending_decision() {
                        on_event(AgentEvent::Thought(msg));
                        continue;
                    }

                    if msg.contains("Final Answer:") {
                        return Ok((extract_final_answer(&msg), usage));
                    }

                    // Looks like a question back to the user; stop here.
                    if msg.trim().ends_with('?') || msg.contains("Please") || msg.contains("Would you")
                    {
                        return Ok((msg, usage));
                    }

                    on_event(AgentEvent::Thought(msg));
                    last_observation = Some(
                        "Please continue your task or provide a Final Answer if you are done."
                            .to_string(),
                    );
                }
                AgentDecision::Action { tool, args } => {
                    on_event(AgentEvent::Status(format!("Tool: '{}'", tool)));

                    let processed_args = extract_args(&args);
                    let observation = match self.tools.execute_tool(&tool, &processed_args).await
                    {
                        Ok(output) => output,
                        Err(e) => format!(
                            "Error: {}. Analyze the failure and try a different input if possible.",
                            e
                        ),
                    };

                    on_event(AgentEvent::Observation(observation.clone()));
                    last_observation = Some(observation);
                }
                AgentDecision::Error(reason) => {
                    return Err(TutorError::AgentStopped { reason });
                }
            }
        }
    }

    /// Generate the system prompt with available tools and ReAct instructions.
    pub async fn generate_system_prompt(&self) -> String {
        let tools = self.tools.get_all_tools().await;
        let mut tools_desc = String::new();
        for tool in &tools {
            tools_desc.push_str(&format!(
                "- {}: {}\n  Usage: {}\n",
                tool.name(),
                tool.description(),
                tool.usage()
            ));
        }

        format!(
            "{}\n\n\
            # Operational Protocol (ReAct)\n\
            You have access to the following tools:\n\n\
            {}\n\
            CRITICAL: You MUST use the following format for every step. Do not skip tags.\n\n\
            Question: the input question you must answer\n\
            Thought: you should always think about what to do\n\
            Action: the action to take, should be one of [{}]\n\
            Action Input: the input to the action\n\
            Observation: the result of the action (STOP after providing Action Input and wait for this)\n\
            ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
            Thought: I now know the final answer\n\
            Final Answer: the final answer to the original input question\n\n\
            ## Example\n\
            Question: What is 25 * 37?\n\
            Thought: I need to multiply 25 by 37 using the calculator.\n\
            Action: calculator\n\
            Action Input: 25 * 37\n\
            Observation: Result: 925\n\
            Thought: I now know the final answer.\n\
            Final Answer: 25 * 37 = 925\n\n\
            IMPORTANT:\n\
            1. You MUST use the tools to compute results instead of doing arithmetic yourself.\n\
            2. After providing an Action and Action Input, STOP and wait for the Observation.\n\
            3. Do not hallucinate or predict the Observation.\n\
            4. ALWAYS prefix your thoughts with 'Thought:'.\n\
            5. If you are stuck or need clarification, use 'Final Answer:' to ask the user.\n\n\
            Begin!",
            self.system_prompt_prefix,
            tools_desc,
            tools
                .iter()
                .map(|t| t.name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Parse "Action:" / "Action Input:" tags out of a ReAct-formatted message.
fn parse_react_action(content: &str) -> Option<(String, String)> {
    let action_re = Regex::new(r"(?m)^Action:\s*(.*)").ok()?;
    let action_input_re = Regex::new(r"(?ms)^Action Input:\s*(.*)$").ok()?;

    let action = action_re.captures(content).map(|c| c[1].trim().to_string())?;

    let caps = action_input_re.captures(content)?;
    let mut input = caps[1].trim().to_string();
    // The model sometimes predicts the Observation; cut it off
    if let Some(pos) = input.find("Observation:") {
        input.truncate(pos);
    }

    Some((action, input.trim().to_string()))
}

/// Tool-calling endpoints wrap arguments in JSON; unwrap the "args" field
/// when present, otherwise pass the raw string through.
fn extract_args(args: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(args) {
        if let Some(inner) = v.get("args").and_then(|a| a.as_str()) {
            return inner.to_string();
        }
    }
    args.to_string()
}

/// Return the text after "Final Answer:", or the whole message when the tag
/// is missing.
fn extract_final_answer(content: &str) -> String {
    match content.split("Final Answer:").nth(1) {
        Some(answer) => answer.trim().to_string(),
        None => content.trim().to_string(),
    }
}

/// Prune history to stay within token limits, keeping the system prompt and
/// the most recent messages.
fn prune_history(history: Vec<ChatMessage>, limit: usize) -> Vec<ChatMessage> {
    if history.len() <= 1 {
        return history;
    }

    let total_chars: usize = history.iter().map(|m| m.content.len()).sum();
    let approx_tokens = total_chars / 4;
    if approx_tokens <= limit {
        return history;
    }

    let system_msg = history[0].clone();
    let mut pruned = vec![system_msg.clone()];

    let mut current_tokens = system_msg.content.len() / 4;
    let mut to_keep = Vec::new();

    // Iterate backwards to keep most recent messages
    for msg in history.iter().skip(1).rev() {
        let msg_tokens = msg.content.len() / 4;
        if current_tokens + msg_tokens < limit {
            to_keep.push(msg.clone());
            current_tokens += msg_tokens;
        } else {
            break;
        }
    }

    to_keep.reverse();

    // Strict APIs require the first message after the system prompt to be
    // a user message
    while !to_keep.is_empty() && to_keep[0].role != MessageRole::User {
        to_keep.remove(0);
    }

    pruned.extend(to_keep);
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools::CalculatorTool;
    use crate::llm::{LlmConfig, LlmProvider};

    async fn test_agent() -> Agent {
        let config = LlmConfig::new(
            LlmProvider::OpenAiCompatible,
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
            Some("sk-test".to_string()),
        );
        let client = Arc::new(LlmClient::new(config).unwrap());
        let tools = ToolRegistry::new();
        tools.register_tool(Arc::new(CalculatorTool::new())).await;
        Agent::new(
            client,
            tools,
            "You are a calculator assistant.".to_string(),
            10,
        )
    }

    #[tokio::test]
    async fn test_system_prompt_lists_tools() {
        let agent = test_agent().await;
        let prompt = agent.generate_system_prompt().await;
        assert!(prompt.contains("calculator"));
        assert!(prompt.contains("Final Answer:"));
        assert!(prompt.starts_with("You are a calculator assistant."));
    }

    #[tokio::test]
    async fn test_reset_inserts_system_prompt() {
        let mut agent = test_agent().await;
        agent.reset(vec![ChatMessage::user("What is 2 + 2?")]).await;
        assert_eq!(agent.history[0].role, MessageRole::System);
        assert_eq!(agent.history.len(), 2);
        assert_eq!(agent.iteration_count, 0);
    }

    #[tokio::test]
    async fn test_observation_follows_native_tool_call() {
        let mut agent = test_agent().await;

        // After a native tool call the result goes back as a tool message
        agent.pending_tool_call = Some(("call_1".to_string(), "calculator".to_string()));
        agent.push_observation("Result: 4".to_string());
        let msg = agent.history.last().unwrap();
        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.content, "Result: 4");
        assert!(agent.pending_tool_call.is_none());

        // Without a pending call (ReAct path) it stays a user message
        agent.push_observation("Result: 9".to_string());
        let msg = agent.history.last().unwrap();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Observation: Result: 9");
    }

    #[test]
    fn test_parse_react_action() {
        let content = "Thought: multiply.\nAction: calculator\nAction Input: 25 * 37\n";
        let (tool, args) = parse_react_action(content).unwrap();
        assert_eq!(tool, "calculator");
        assert_eq!(args, "25 * 37");
    }

    #[test]
    fn test_parse_react_action_strips_predicted_observation() {
        let content = "Action: calculator\nAction Input: 2 + 2\nObservation: Result: 4";
        let (_, args) = parse_react_action(content).unwrap();
        assert_eq!(args, "2 + 2");
    }

    #[test]
    fn test_parse_react_action_absent() {
        assert!(parse_react_action("Final Answer: 4").is_none());
    }

    #[test]
    fn test_extract_args() {
        assert_eq!(extract_args(r#"{"args": "2 + 2"}"#), "2 + 2");
        assert_eq!(extract_args("2 + 2"), "2 + 2");
        assert_eq!(extract_args(r#"{"other": 1}"#), r#"{"other": 1}"#);
    }

    #[test]
    fn test_extract_final_answer() {
        assert_eq!(
            extract_final_answer("Thought: done.\nFinal Answer: 25 * 37 = 925"),
            "25 * 37 = 925"
        );
        assert_eq!(extract_final_answer("plain text"), "plain text");
    }

    #[tokio::test]
    async fn test_repetition_guard() {
        let mut agent = test_agent().await;
        assert!(agent.track_repetition("calculator", "2 + 2").is_none());
        assert!(agent.track_repetition("calculator", "2 + 2").is_none());
        assert!(agent.track_repetition("calculator", "2 + 2").is_none());
        // Fourth identical call trips the guard
        assert!(matches!(
            agent.track_repetition("calculator", "2 + 2"),
            Some(AgentDecision::Error(_))
        ));
        // A different call resets the counter
        agent.repetition_count = 0;
        assert!(agent.track_repetition("calculator", "3 + 3").is_none());
    }

    #[test]
    fn test_prune_history_keeps_system_and_recent() {
        let mut history = vec![ChatMessage::system("sys")];
        for _ in 0..50 {
            // 20 approximate tokens per message
            history.push(ChatMessage::user("u".repeat(80)));
            history.push(ChatMessage::assistant("a".repeat(80)));
        }
        let pruned = prune_history(history, 50);
        assert_eq!(pruned[0].role, MessageRole::System);
        assert!(pruned.len() < 20);
        // First kept message after system must be from the user
        assert_eq!(pruned[1].role, MessageRole::User);
    }

    #[test]
    fn test_prune_history_noop_under_limit() {
        let history = vec![
            ChatMessage::system("sys"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let pruned = prune_history(history.clone(), 1000);
        assert_eq!(pruned.len(), history.len());
    }
}
