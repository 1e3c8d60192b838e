//! Structured content shapes the model is asked to produce.
//!
//! These structs are the parser's side of the prompt contract: the system
//! instructions in `prompts.rs` describe the same shapes textually. Change one
//! and you must change the other — the colocated tests cross-check them.

use serde::{Deserialize, Serialize};

use crate::generation::request::ContentType;

/// One block of a learning roadmap, e.g. a week of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub topics: Vec<MilestoneTopic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneTopic {
    pub subtopic: String,
    /// Free-text duration, e.g. "3 hours".
    pub time: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`. Not bounds-checked against the
    /// options list; out-of-range values are passed through as-is.
    #[serde(rename = "answerIndex")]
    pub answer_index: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub title: String,
    /// Kind of resource, e.g. "video", "article", "book", "course".
    #[serde(rename = "type")]
    pub resource_type: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    pub resources: Vec<ResourceItem>,
}

/// Parsed model output, tagged by content type internally but serialized
/// untagged so callers receive the bare structure (`{"questions": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedContent {
    Roadmap(Roadmap),
    Quiz(Quiz),
    Resources(ResourceList),
}

impl ParsedContent {
    /// The canonical empty default for a content type: well-shaped, zero
    /// content. This is what callers get when the model's output cannot be
    /// parsed — never a null and never an error.
    pub fn empty_default(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Roadmap => ParsedContent::Roadmap(Roadmap { milestones: vec![] }),
            ContentType::Quiz => ParsedContent::Quiz(Quiz { questions: vec![] }),
            ContentType::Resources => {
                ParsedContent::Resources(ResourceList { resources: vec![] })
            }
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ParsedContent::Roadmap(_) => ContentType::Roadmap,
            ParsedContent::Quiz(_) => ContentType::Quiz,
            ParsedContent::Resources(_) => ContentType::Resources,
        }
    }
}
