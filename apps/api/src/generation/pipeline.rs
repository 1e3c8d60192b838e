//! Pipeline Orchestrator — one content request in, one structured result out.
//!
//! Flow: validate → build prompt → invoke model → parse → record (best-effort)
//! → return. Linear, synchronous within the request, exactly one model round
//! trip, no retries.
//!
//! Failure policy is asymmetric on purpose:
//! - validation and model-invocation failures surface to the caller;
//! - parse failures degrade to the content type's empty default;
//! - persistence failures are logged and swallowed.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::content::ParsedContent;
use crate::generation::parser::parse_content;
use crate::generation::prompts::build_prompt;
use crate::generation::request::ContentRequest;
use crate::generation::store::ContentStore;
use crate::llm_client::ModelClient;

/// Runs the full generation pipeline for one request.
///
/// Terminal states: `Ok(ParsedContent)` (possibly the empty default),
/// `Err(AppError::Validation)` (no model call made, nothing persisted), or
/// `Err(AppError::Llm)` (provider failed; no fallback content).
pub async fn run(
    llm: &dyn ModelClient,
    store: &dyn ContentStore,
    request: ContentRequest,
) -> Result<ParsedContent, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let prompt = build_prompt(&request);

    info!(
        "Generating {} content (course: {:?})",
        request.content_type.as_str(),
        request.course
    );

    let raw = llm
        .generate(prompt.system, &prompt.user)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let content = parse_content(&raw, request.content_type);

    // Best-effort append to the content log. A failed write must never fail
    // or delay the response the caller sees.
    if let Err(e) = store.record(&request, &content).await {
        warn!("Content log write failed (ignored): {e:#}");
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::generation::request::ContentType;
    use crate::llm_client::ModelError;

    /// Mock model that returns a canned response and counts invocations.
    struct MockModel {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl MockModel {
        fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for MockModel {
        async fn generate(
            &self,
            _system_instruction: &str,
            _user_message: &str,
        ) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(ModelError::Api {
                    status: 429,
                    message: "Quota exceeded".to_string(),
                }),
            }
        }
    }

    /// Mock store that records writes and can be told to fail.
    struct MockStore {
        fail: bool,
        records: Mutex<Vec<(ContentType, ParsedContent)>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                fail: false,
                records: Mutex::new(vec![]),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                records: Mutex::new(vec![]),
            }
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentStore for MockStore {
        async fn record(
            &self,
            request: &ContentRequest,
            content: &ParsedContent,
        ) -> anyhow::Result<()> {
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            self.records
                .lock()
                .unwrap()
                .push((request.content_type, content.clone()));
            Ok(())
        }
    }

    fn quiz_request() -> ContentRequest {
        ContentRequest {
            content_type: ContentType::Quiz,
            course: "Biology".to_string(),
            topic: "Cells".to_string(),
            subtopic: "Mitosis".to_string(),
            description: "stages of mitosis".to_string(),
            time: String::new(),
            knowledge_level: String::new(),
        }
    }

    const QUIZ_JSON: &str = r#"{"questions":[{"question":"Which phase is first?","options":["A","B","C","D"],"answerIndex":1,"reason":"Prophase starts mitosis."}]}"#;

    #[tokio::test]
    async fn test_valid_quiz_round_trip_returns_parsed_content() {
        let model = MockModel::returning(QUIZ_JSON);
        let store = MockStore::new();

        let content = run(&model, &store, quiz_request()).await.unwrap();

        let ParsedContent::Quiz(quiz) = content else {
            panic!("expected quiz");
        };
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].answer_index, 1);
        assert_eq!(model.call_count(), 1);
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_model_output_returns_empty_default_success() {
        let model = MockModel::returning("I cannot comply");
        let store = MockStore::new();

        let content = run(&model, &store, quiz_request()).await.unwrap();

        assert_eq!(content, ParsedContent::empty_default(ContentType::Quiz));
        // Even the empty default gets logged
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_required_field_stops_before_any_side_effect() {
        let model = MockModel::returning(QUIZ_JSON);
        let store = MockStore::new();

        let mut request = quiz_request();
        request.description = String::new();

        let err = run(&model, &store, request).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(model.call_count(), 0, "no model call on validation failure");
        assert_eq!(store.record_count(), 0, "nothing persisted on validation failure");
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_with_no_fallback_content() {
        let model = MockModel::failing();
        let store = MockStore::new();

        let err = run(&model, &store, quiz_request()).await.unwrap_err();

        match err {
            AppError::Llm(msg) => assert!(msg.contains("Quota exceeded")),
            other => panic!("expected Llm error, got {other:?}"),
        }
        assert_eq!(model.call_count(), 1, "exactly one round trip, no retry");
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_never_alters_the_result() {
        let model = MockModel::returning(QUIZ_JSON);
        let failing_store = MockStore::failing();
        let ok_store = MockStore::new();

        let with_failure = run(&model, &failing_store, quiz_request()).await.unwrap();
        let without_failure = run(&model, &ok_store, quiz_request()).await.unwrap();

        assert_eq!(with_failure, without_failure);
    }

    #[tokio::test]
    async fn test_roadmap_with_only_topic_generates_successfully() {
        let model =
            MockModel::returning(r#"{"milestones":[{"title":"Week 1","topics":[]}]}"#);
        let store = MockStore::new();

        let request = ContentRequest {
            content_type: ContentType::Roadmap,
            course: "Rust".to_string(),
            topic: String::new(),
            subtopic: String::new(),
            description: String::new(),
            time: String::new(),
            knowledge_level: String::new(),
        };

        let content = run(&model, &store, request).await.unwrap();
        let ParsedContent::Roadmap(roadmap) = content else {
            panic!("expected roadmap");
        };
        assert_eq!(roadmap.milestones.len(), 1);
        assert_eq!(model.call_count(), 1);
    }
}
