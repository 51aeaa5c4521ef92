// tests/structured_completion.rs
// Totality: for any prompt and any server behavior (valid JSON, invalid
// JSON, unavailable), exactly one outcome is produced. Only transport
// failures are errors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trending_topic_analyzer::completion::{
    CompletionClient, CompletionOutcome, CompletionRequest, StructuredCompletion,
    UNAVAILABLE_MARKER,
};
use trending_topic_analyzer::error::CompletionError;

enum Reply {
    Text(&'static str),
    Status(u16),
}

struct StubClient {
    available: bool,
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl StubClient {
    fn wrap(available: bool, reply: Reply) -> (StructuredCompletion, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = Self {
            available,
            reply,
            calls: calls.clone(),
        };
        (StructuredCompletion::new(Arc::new(client)), calls)
    }
}

#[async_trait::async_trait]
impl CompletionClient for StubClient {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Text(t) => Ok(t.to_string()),
            Reply::Status(code) => Err(CompletionError::Status(code)),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[tokio::test]
async fn valid_json_yields_structured_fields() {
    let (completion, _) = StubClient::wrap(true, Reply::Text(r#"{"momentum": "accelerating"}"#));
    let outcome = completion
        .request(&CompletionRequest::user_prompt("why trending?"))
        .await
        .unwrap();
    match outcome {
        CompletionOutcome::Structured { fields } => {
            assert_eq!(fields["momentum"], "accelerating");
        }
        other => panic!("expected structured, got {other:?}"),
    }
}

#[tokio::test]
async fn prose_yields_unstructured_with_a_best_effort_shell() {
    let (completion, _) = StubClient::wrap(
        true,
        Reply::Text("It is trending because of last night's game."),
    );
    let outcome = completion
        .request(&CompletionRequest::user_prompt("why trending?"))
        .await
        .unwrap();
    match outcome {
        CompletionOutcome::Unstructured {
            raw_text,
            reason,
            shell,
        } => {
            assert_eq!(raw_text, "It is trending because of last night's game.");
            assert!(reason.starts_with("invalid json"));
            assert_eq!(shell.excerpt, raw_text);
            assert!(!shell.note.is_empty());
        }
        other => panic!("expected unstructured, got {other:?}"),
    }
}

#[tokio::test]
async fn unavailable_service_is_terminal_and_issues_no_request() {
    let (completion, calls) = StubClient::wrap(false, Reply::Text("never sent"));
    assert!(!completion.is_available());

    let outcome = completion
        .request(&CompletionRequest::user_prompt("anything"))
        .await
        .unwrap();
    match outcome {
        CompletionOutcome::Unstructured { reason, .. } => {
            assert_eq!(reason, UNAVAILABLE_MARKER);
        }
        other => panic!("expected unstructured, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_propagates_as_an_error() {
    let (completion, calls) = StubClient::wrap(true, Reply::Status(502));
    let err = completion
        .request(&CompletionRequest::user_prompt("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Status(502)));
    assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one attempt, no retry");
}
