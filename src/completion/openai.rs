// src/completion/openai.rs
//! Generative completion client. The shipped implementation talks to an
//! OpenAI-compatible chat-completions endpoint; availability is discoverable
//! up front so callers never have to probe with a live request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::CompletionError;

/// Default model identifier used when a request does not pin one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Fixed low-randomness sampling for analysis calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// One generation request: a user prompt, an optional system message, and
/// optional model/temperature overrides.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub user: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn user_prompt(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            user: prompt.into(),
            model: None,
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Up-front availability check; `false` is an expected, non-exceptional
    /// state (missing credentials), not a probe failure.
    fn is_available(&self) -> bool;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    fn name(&self) -> &'static str;
}

pub struct OpenAiCompletion {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompletion {
    pub fn new(config: &ModelConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("trending-topic-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiCompletion {
    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        if !self.is_available() {
            return Err(CompletionError::Unavailable);
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(Msg {
                role: "system",
                content: system,
            });
        }
        messages.push(Msg {
            role: "user",
            content: &request.user,
        });

        let req = Req {
            model: request.model.as_deref().unwrap_or(&self.model),
            messages,
            temperature: request.temperature.unwrap_or(self.temperature),
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CompletionError::Status(resp.status().as_u16()));
        }

        let body: Resp = resp.json().await?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        Ok(content.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Client used when no generative service is configured. `is_available` is
/// false, so `StructuredCompletion` short-circuits before ever calling it.
pub struct DisabledCompletion;

#[async_trait::async_trait]
impl CompletionClient for DisabledCompletion {
    fn is_available(&self) -> bool {
        false
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
