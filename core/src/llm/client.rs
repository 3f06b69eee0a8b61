//! LLM client implementation
//!
//! Talks to any OpenAI-compatible chat-completions endpoint. Handles
//! authentication headers, retry with jittered backoff on transient
//! failures, and mapping provider failures onto the error taxonomy.

use super::chat::{ChatRequest, ChatResponse};
use super::LlmConfig;
use crate::error::{Result, TutorError};
use crate::util::{sanitize_base_url, validate_api_key};
use crate::{error_log, info_log, warn_log};
use rand::Rng;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as HttpClient, StatusCode,
};
use tokio::time::{sleep, Duration};

/// LLM Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI-compatible API (works with OpenAI, Ollama, LM Studio, local models)
    OpenAiCompatible,
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "ollama" | "lmstudio" | "local" | "openrouter" | "custom" => {
                Ok(LlmProvider::OpenAiCompatible)
            }
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAiCompatible => write!(f, "OpenAI Compatible"),
        }
    }
}

/// Main LLM Client
pub struct LlmClient {
    config: LlmConfig,
    http_client: HttpClient,
}

impl LlmClient {
    /// Create a new LLM client
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(120))
            .user_agent("aitutor/0.1")
            .build()
            .map_err(|e| TutorError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(LlmClient {
            config,
            http_client,
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// The client configuration
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.config.api_key {
            let key = validate_api_key(key).map_err(|e| TutorError::InvalidConfig {
                message: e.to_string(),
            })?;
            let value = format!("Bearer {}", key);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|e| TutorError::InvalidConfig {
                    message: format!("API key not usable in a header: {}", e),
                })?,
            );
        }

        Ok(headers)
    }

    /// Send a chat request and get a response
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        info_log!(
            "Chat request: model={}, messages={}, tools={}",
            self.config.model,
            request.messages.len(),
            request.tools.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        let base_url = sanitize_base_url(&self.config.base_url, "Base URL").map_err(|e| {
            TutorError::InvalidConfig {
                message: e.to_string(),
            }
        })?;
        let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        let mut body = ChatRequest::new(self.config.model.clone(), request.messages.clone());
        body.max_tokens = request.max_tokens.or(self.config.max_tokens);
        body.temperature = request.temperature.or(self.config.temperature);
        body.tools = request.tools.clone();

        let headers = self.build_headers()?;
        let response = self
            .retry_with_backoff(|| async {
                self.http_client
                    .post(&url)
                    .headers(headers.clone())
                    .json(&body)
                    .send()
                    .await
            })
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let text = response
                    .text()
                    .await
                    .map_err(|e| TutorError::Http(format!("failed to read response: {}", e)))?;
                let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
                    error_log!("Failed to parse provider response: {}. Raw body: {}", e, text);
                    TutorError::Json(format!("failed to parse provider response: {}", e))
                })?;

                if let Some(usage) = &parsed.usage {
                    info_log!(
                        "Chat completed: prompt={} completion={} total={}",
                        usage.prompt_tokens,
                        usage.completion_tokens,
                        usage.total_tokens
                    );
                }
                Ok(parsed)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let message = response.text().await.unwrap_or_default();
                error_log!("Provider rejected credentials: {}", message);
                Err(TutorError::Unauthorized { message })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(TutorError::RateLimitExceeded {
                retry_after: parse_retry_after(&response),
            }),
            _ => {
                let message = response.text().await.unwrap_or_default();
                error_log!("Provider error {}: {}", status, message);
                Err(TutorError::ProviderError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Retry helper with jittered exponential backoff, respecting
    /// Retry-After on 429 responses.
    async fn retry_with_backoff<F, Fut>(&self, operation: F) -> Result<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 0;
        let max_retries = 5;
        let mut delay = Duration::from_secs(2);

        loop {
            match operation().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_server_error() && status != StatusCode::TOO_MANY_REQUESTS {
                        return Ok(response);
                    }

                    if attempt >= max_retries {
                        warn_log!(
                            "Giving up after {} retries (last status {})",
                            max_retries,
                            status
                        );
                        return Ok(response);
                    }

                    let wait = if status == StatusCode::TOO_MANY_REQUESTS {
                        parse_retry_after(&response).unwrap_or(delay)
                    } else {
                        delay
                    };
                    warn_log!(
                        "Provider returned {}, retrying in {:?} (attempt {}/{})",
                        status,
                        wait,
                        attempt + 1,
                        max_retries
                    );
                    sleep(wait).await;
                }
                Err(e) => {
                    if attempt >= max_retries {
                        return Err(e.into());
                    }
                    warn_log!("Network error ({}), retrying in {:?}", e, delay);
                    sleep(delay).await;
                }
            }

            attempt += 1;
            delay *= 2;
            // Jitter: +/- 500ms
            let jitter_ms = rand::thread_rng().gen_range(-500..=500);
            let delay_ms = (delay.as_millis() as i64 + jitter_ms).max(100) as u64;
            delay = Duration::from_millis(delay_ms);
        }
    }
}

fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmConfig;

    fn test_config() -> LlmConfig {
        LlmConfig::new(
            LlmProvider::OpenAiCompatible,
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
            Some("sk-test".to_string()),
        )
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "openai".parse::<LlmProvider>(),
            Ok(LlmProvider::OpenAiCompatible)
        );
        assert_eq!(
            "Ollama".parse::<LlmProvider>(),
            Ok(LlmProvider::OpenAiCompatible)
        );
        assert!("not-a-provider".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_build_headers_includes_bearer() {
        let client = LlmClient::new(test_config()).unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer sk-test"
        );
    }

    #[test]
    fn test_build_headers_rejects_bad_key() {
        let mut config = test_config();
        config.api_key = Some("bad\nkey".to_string());
        let client = LlmClient::new(config).unwrap();
        assert!(matches!(
            client.build_headers(),
            Err(TutorError::InvalidConfig { .. })
        ));
    }
}
