use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::core::agent::CompletionProvider;
use crate::core::persona::AgentPersona;
use crate::error::{PlannerError, Result};

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// One request per call: rate limits and server errors surface as errors
/// immediately. No timeout is applied unless one is set.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
    client: Client,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: crate::config::DEFAULT_OPENAI_BASE_URL.to_string(),
            model: model.into(),
            max_tokens: None,
            timeout: None,
            client: http_client(None)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Rebuilds the underlying HTTP client with `timeout` (`None` clears it).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Result<Self> {
        self.client = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let response_text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PlannerError::RateLimit {
                retry_after: retry_after.unwrap_or(1).max(1),
            });
        }

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|json| json.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json = response_json.ok_or_else(|| {
            PlannerError::InvalidResponse("completion response is not valid JSON".to_string())
        })?;

        if let Some(error) = response_json.get("error").filter(|error| !error.is_null()) {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: error_message,
            });
        }

        Ok(response_json)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIClient {
    async fn complete(&self, persona: &AgentPersona, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest::new(
            self.model.clone(),
            vec![
                json!({ "role": "system", "content": persona.system_prompt() }),
                json!({ "role": "user", "content": prompt }),
            ],
        )
        .with_max_tokens(self.max_tokens)
        .into_value();

        debug!(model = %self.model, role = persona.role, "sending completion request");
        let response = self.chat_completion(&body).await?;
        extract_completion_text(&response)
    }
}

/// Pull `choices[0].message.content` out of a completion response as text.
pub fn extract_completion_text(response: &Value) -> Result<String> {
    let first_choice = response
        .get("choices")
        .and_then(|value| value.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| {
            PlannerError::InvalidResponse("Completion response contained no choices".to_string())
        })?;

    let message = first_choice.get("message").ok_or_else(|| {
        PlannerError::InvalidResponse("Completion response missing assistant message".to_string())
    })?;

    Ok(match message.get("content") {
        Some(Value::String(text)) => text.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    })
}

/// A reqwest client, with a request timeout only when one is given
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}
