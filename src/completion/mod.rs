// src/completion/mod.rs
//! One request/response exchange with a generative text service, normalized
//! into a structured-or-raw outcome. Data-shape problems never raise: they
//! are classified into `CompletionOutcome::Unstructured`. Only transport
//! failures propagate as errors.

pub mod openai;

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CompletionError;

pub use crate::completion::openai::{
    CompletionClient, CompletionRequest, DisabledCompletion, OpenAiCompletion, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};

/// Fixed marker for the terminal, non-retryable "service not configured"
/// outcome.
pub const UNAVAILABLE_MARKER: &str = "model service unavailable";

const SHELL_NOTE: &str = "response was not valid structured output";
const SHELL_EXCERPT_CHARS: usize = 200;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("completion_requests_total", "Generation requests issued.");
        describe_counter!(
            "completion_unavailable_total",
            "Requests answered without a call because the model is unavailable."
        );
        describe_counter!(
            "completion_decode_failures_total",
            "Responses that failed to decode as keyed documents."
        );
    });
}

/// Minimal structured stand-in built when a response cannot be decoded, so
/// downstream consumers expecting keys still receive a best-effort value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackShell {
    pub excerpt: String,
    pub note: String,
}

/// Classified response of one generation exchange. Exactly one variant is
/// always produced; construction never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    Structured {
        fields: serde_json::Map<String, Value>,
    },
    Unstructured {
        raw_text: String,
        reason: String,
        shell: FallbackShell,
    },
}

impl CompletionOutcome {
    pub fn service_unavailable() -> Self {
        CompletionOutcome::Unstructured {
            raw_text: String::new(),
            reason: UNAVAILABLE_MARKER.to_string(),
            shell: FallbackShell {
                excerpt: String::new(),
                note: UNAVAILABLE_MARKER.to_string(),
            },
        }
    }

    /// Classify raw model text. A keyed JSON document becomes `Structured`;
    /// anything else becomes `Unstructured` with a synthesized shell.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(text.trim()) {
            Ok(Value::Object(fields)) => CompletionOutcome::Structured { fields },
            Ok(_) => Self::unstructured(text, "decoded value is not a keyed document".into()),
            Err(e) => Self::unstructured(text, format!("invalid json: {e}")),
        }
    }

    fn unstructured(raw_text: String, reason: String) -> Self {
        let shell = FallbackShell {
            excerpt: excerpt_of(&raw_text),
            note: SHELL_NOTE.to_string(),
        };
        CompletionOutcome::Unstructured {
            raw_text,
            reason,
            shell,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, CompletionOutcome::Structured { .. })
    }
}

/// Truncated head of a raw response, used for fallback shells.
pub fn excerpt_of(text: &str) -> String {
    if text.chars().count() > SHELL_EXCERPT_CHARS {
        let head: String = text.chars().take(SHELL_EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Wrapper owning the client seam: checks availability up front, issues
/// exactly one request, classifies the response.
#[derive(Clone)]
pub struct StructuredCompletion {
    client: Arc<dyn CompletionClient>,
}

impl StructuredCompletion {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_available()
    }

    /// Issue one generation request and classify its output.
    ///
    /// Unavailability is a terminal `Unstructured` outcome, never an error.
    /// Transport failures (connect/timeout/status) propagate to the caller;
    /// they denote infrastructure failure, not a data-shape problem.
    pub async fn request(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionOutcome, CompletionError> {
        ensure_metrics_described();

        if !self.client.is_available() {
            counter!("completion_unavailable_total").increment(1);
            return Ok(CompletionOutcome::service_unavailable());
        }

        counter!("completion_requests_total").increment(1);
        let text = self.client.complete(request).await?;
        let outcome = CompletionOutcome::from_text(text);
        if !outcome.is_structured() {
            counter!("completion_decode_failures_total").increment(1);
            tracing::warn!(client = self.client.name(), "completion was not structured");
        }
        Ok(outcome)
    }
}
