//! Response Parser — turns raw model text into a `ParsedContent`.
//!
//! Total function: no input makes it fail. Malformed output (broken JSON,
//! missing keys, wrong types) degrades to the content type's canonical empty
//! default. The caller sees a well-shaped result either way; availability is
//! traded for silent data loss here, on purpose.

use tracing::warn;

use crate::generation::content::{ParsedContent, Quiz, ResourceList, Roadmap};
use crate::generation::request::ContentType;

/// Parses raw model output against the content type's expected shape.
/// Any parse failure yields `ParsedContent::empty_default(content_type)`.
pub fn parse_content(raw: &str, content_type: ContentType) -> ParsedContent {
    let cleaned = strip_json_fences(raw);

    let parsed = match content_type {
        ContentType::Roadmap => {
            serde_json::from_str::<Roadmap>(cleaned).map(ParsedContent::Roadmap)
        }
        ContentType::Quiz => serde_json::from_str::<Quiz>(cleaned).map(ParsedContent::Quiz),
        ContentType::Resources => {
            serde_json::from_str::<ResourceList>(cleaned).map(ParsedContent::Resources)
        }
    };

    match parsed {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "Model output failed to parse as {}: {e} — returning empty default",
                content_type.as_str()
            );
            ParsedContent::empty_default(content_type)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// The response MIME type asks for bare JSON, but models occasionally fence anyway.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::content::QuizQuestion;

    const VALID_QUIZ: &str = r#"{
        "questions": [
            {
                "question": "Which phase follows prophase in mitosis?",
                "options": ["A", "B", "C", "D"],
                "answerIndex": 1,
                "reason": "Metaphase follows prophase."
            }
        ]
    }"#;

    #[test]
    fn test_valid_quiz_parses_unchanged() {
        let content = parse_content(VALID_QUIZ, ContentType::Quiz);
        let ParsedContent::Quiz(quiz) = content else {
            panic!("expected quiz");
        };
        assert_eq!(
            quiz.questions,
            vec![QuizQuestion {
                question: "Which phase follows prophase in mitosis?".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string()
                ],
                answer_index: 1,
                reason: "Metaphase follows prophase.".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_json_text_yields_empty_quiz() {
        let content = parse_content("I cannot comply", ContentType::Quiz);
        assert_eq!(content, ParsedContent::empty_default(ContentType::Quiz));
    }

    #[test]
    fn test_missing_required_key_yields_empty_default() {
        // Valid JSON, wrong shape: questions missing "reason"
        let raw = r#"{"questions": [{"question": "Q", "options": ["A"], "answerIndex": 0}]}"#;
        let content = parse_content(raw, ContentType::Quiz);
        assert_eq!(content, ParsedContent::empty_default(ContentType::Quiz));
    }

    #[test]
    fn test_wrong_type_for_answer_index_yields_empty_default() {
        let raw = r#"{"questions": [{"question": "Q", "options": ["A"], "answerIndex": "one", "reason": "r"}]}"#;
        let content = parse_content(raw, ContentType::Quiz);
        assert_eq!(content, ParsedContent::empty_default(ContentType::Quiz));
    }

    #[test]
    fn test_out_of_range_answer_index_is_passed_through() {
        // Bounds are deliberately not checked; malformed-but-parseable output
        // is accepted as-is.
        let raw = r#"{"questions": [{"question": "Q", "options": ["A", "B"], "answerIndex": 9, "reason": "r"}]}"#;
        let ParsedContent::Quiz(quiz) = parse_content(raw, ContentType::Quiz) else {
            panic!("expected quiz");
        };
        assert_eq!(quiz.questions[0].answer_index, 9);
    }

    #[test]
    fn test_fenced_json_is_unwrapped_before_parsing() {
        let fenced = format!("```json\n{VALID_QUIZ}\n```");
        let ParsedContent::Quiz(quiz) = parse_content(&fenced, ContentType::Quiz) else {
            panic!("expected quiz");
        };
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn test_roadmap_parses() {
        let raw = r#"{
            "milestones": [
                {
                    "title": "Week 1: Foundations",
                    "topics": [
                        {"subtopic": "Ownership", "time": "3 hours", "description": "Moves and borrows"}
                    ]
                }
            ]
        }"#;
        let ParsedContent::Roadmap(roadmap) = parse_content(raw, ContentType::Roadmap) else {
            panic!("expected roadmap");
        };
        assert_eq!(roadmap.milestones.len(), 1);
        assert_eq!(roadmap.milestones[0].topics[0].subtopic, "Ownership");
    }

    #[test]
    fn test_malformed_output_yields_matching_empty_default_per_type() {
        for content_type in [ContentType::Roadmap, ContentType::Quiz, ContentType::Resources] {
            let content = parse_content("{\"unexpected\": true}", content_type);
            assert_eq!(content, ParsedContent::empty_default(content_type));
            assert_eq!(content.content_type(), content_type);
        }
    }

    #[test]
    fn test_parse_is_idempotent_on_garbage() {
        let first = parse_content("garbage", ContentType::Resources);
        let second = parse_content("garbage", ContentType::Resources);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strip_json_fences_variants() {
        assert_eq!(strip_json_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_json_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_json_fences("{}"), "{}");
        assert_eq!(strip_json_fences("  {} "), "{}");
    }
}
