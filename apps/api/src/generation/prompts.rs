//! Prompt Builder — fixed system instruction per content type plus a user
//! message interpolating the request fields verbatim.
//!
//! Each system instruction embeds the exact output schema the parser expects
//! (`content.rs`). The schema lives here as text and there as structs; keep
//! them in lockstep.
//!
//! Pure transformation: no I/O, no failure path. Malformed requests are
//! rejected by the pipeline before they reach this module.

use crate::generation::request::{ContentRequest, ContentType};

/// Defaults applied to missing roadmap fields. Roadmap is the only content
/// type with defaults; quiz and resources require their fields up front.
pub const DEFAULT_TOPIC: &str = "Machine Learning";
pub const DEFAULT_TIME: &str = "4 weeks";
pub const DEFAULT_KNOWLEDGE_LEVEL: &str = "Absolute Beginner";

/// System instruction for roadmap generation — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str = "You are an AI agent who creates structured learning roadmaps. \
    The roadmap is based on a topic, the time the learner has available, and their knowledge level. \
    Split the available time into milestones (for example one per week) and order them so earlier \
    milestones cover prerequisites for later ones. Decide the number of subtopics per milestone \
    based on how much can realistically be learned in the time given. \
    Output in JSON format only. Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Output in format {\"milestones\": [{\"title\": \"...\", \"topics\": [{\"subtopic\": \"...\", \"time\": \"...\", \"description\": \"...\"}]}]}";

/// System instruction for quiz generation — enforces JSON-only output.
pub const QUIZ_SYSTEM: &str = "You are an AI agent who provides quizzes to test understanding of \
    user on a topic. The quiz will be based on topic, subtopic and the description of subtopic \
    which describes what exactly to learn. Output questions in JSON format. The questions must be \
    Multiple Choice Questions, can include calculation if necessary. Decide the number of questions \
    based on description of the subtopic. Try to make as many questions as possible. Include \
    questions that require deep thinking. answerIndex is the zero-based index of the correct option. \
    Do NOT include any text outside the JSON object. Do NOT use markdown code fences. \
    Output in format {\"questions\": [{\"question\": \"...\", \"options\": [\"...\"], \"answerIndex\": 0, \"reason\": \"...\"}]}";

/// System instruction for learning-resource generation — enforces JSON-only output.
pub const RESOURCES_SYSTEM: &str = "You are an AI agent who recommends learning resources. \
    Recommendations are based on a course, what the learner wants to learn, their knowledge level, \
    and the time they have available. Recommend real, well-known resources (documentation, books, \
    videos, courses, articles) ordered from most to least relevant. \
    Output in JSON format only. Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Output in format {\"resources\": [{\"title\": \"...\", \"type\": \"...\", \"link\": \"...\", \"description\": \"...\"}]}";

/// A built prompt: fixed system instruction + interpolated user message.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

/// Builds the prompt for a content request. Request fields are interpolated
/// verbatim; only roadmap fields fall back to defaults when empty.
pub fn build_prompt(request: &ContentRequest) -> Prompt {
    match request.content_type {
        ContentType::Roadmap => Prompt {
            system: ROADMAP_SYSTEM,
            user: format!(
                "Create a learning roadmap for the topic \"{}\". The learner has {} available \
                and their knowledge level is \"{}\".",
                or_default(&request.course, DEFAULT_TOPIC),
                or_default(&request.time, DEFAULT_TIME),
                or_default(&request.knowledge_level, DEFAULT_KNOWLEDGE_LEVEL),
            ),
        },
        ContentType::Quiz => Prompt {
            system: QUIZ_SYSTEM,
            user: format!(
                "The user is learning the course {}. In the course the user is learning topic \
                \"{}\". Create quiz on subtopic \"{}\". The description of the subtopic is \"{}\".",
                request.course, request.topic, request.subtopic, request.description,
            ),
        },
        ContentType::Resources => Prompt {
            system: RESOURCES_SYSTEM,
            user: format!(
                "The user is learning the course {}. Their knowledge level is \"{}\" and they \
                have {} available. Recommend learning resources for: \"{}\".",
                request.course, request.knowledge_level, request.time, request.description,
            ),
        },
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}
