//! Content request types and per-type required-field validation.

use serde::{Deserialize, Serialize};

/// The three kinds of learning content the pipeline can generate.
/// Determines the prompt template and the expected output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Roadmap,
    Quiz,
    Resources,
}

impl ContentType {
    /// Table-friendly name, used for the content log.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Roadmap => "roadmap",
            ContentType::Quiz => "quiz",
            ContentType::Resources => "resources",
        }
    }
}

/// A validated-or-validatable content request. One struct covers all three
/// content types; fields a type does not use stay empty.
///
/// Which fields are required:
/// - Roadmap: none — the prompt builder fills defaults for anything missing.
/// - Quiz: course, topic, subtopic, description.
/// - Resources: course, knowledge_level, description, time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content_type: ContentType,
    /// The course (or, for roadmaps, the overall topic) being learned.
    #[serde(default)]
    pub course: String,
    /// Quiz only: the topic within the course.
    #[serde(default)]
    pub topic: String,
    /// Quiz only: the subtopic the quiz tests.
    #[serde(default)]
    pub subtopic: String,
    #[serde(default)]
    pub description: String,
    /// Free-text duration, e.g. "4 weeks".
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub knowledge_level: String,
}

impl ContentRequest {
    /// Checks that every field required by this content type is non-empty.
    /// Runs before any prompt is built or any model call is made.
    pub fn validate(&self) -> Result<(), String> {
        let required: Vec<(&str, &str)> = match self.content_type {
            ContentType::Roadmap => vec![],
            ContentType::Quiz => vec![
                ("course", self.course.as_str()),
                ("topic", self.topic.as_str()),
                ("subtopic", self.subtopic.as_str()),
                ("description", self.description.as_str()),
            ],
            ContentType::Resources => vec![
                ("course", self.course.as_str()),
                ("knowledge_level", self.knowledge_level.as_str()),
                ("description", self.description.as_str()),
                ("time", self.time.as_str()),
            ],
        };

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("Required field '{name}' is missing or empty"));
            }
        }
        Ok(())
    }
}
