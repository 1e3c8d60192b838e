//! Axum route handlers for the content generation API.
//!
//! Each endpoint maps 1:1 to a pipeline run for its content type. Handlers
//! only translate the HTTP body into a `ContentRequest`; all validation and
//! failure policy lives in `pipeline::run`.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::content::ParsedContent;
use crate::generation::pipeline;
use crate::generation::request::{ContentRequest, ContentType};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

// Fields default to empty rather than failing deserialization: missing-field
// errors belong to the pipeline's validator, which knows which fields each
// content type actually requires.

#[derive(Debug, Deserialize)]
pub struct RoadmapBody {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub knowledge_level: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizBody {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub subtopic: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourcesBody {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub knowledge_level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/roadmap
///
/// Generates a learning roadmap. All fields optional; missing ones get the
/// documented defaults. Generation is identity-independent — the extractor
/// only gates access.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<RoadmapBody>,
) -> Result<Json<ParsedContent>, AppError> {
    let request = ContentRequest {
        content_type: ContentType::Roadmap,
        course: body.topic,
        topic: String::new(),
        subtopic: String::new(),
        description: String::new(),
        time: body.time,
        knowledge_level: body.knowledge_level,
    };

    let content = pipeline::run(state.llm.as_ref(), state.store.as_ref(), request).await?;
    Ok(Json(content))
}

/// POST /api/quiz
///
/// Generates a multiple-choice quiz. Requires course, topic, subtopic and
/// description; rejects with 400 before any model call otherwise.
pub async fn handle_quiz(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<QuizBody>,
) -> Result<Json<ParsedContent>, AppError> {
    let request = ContentRequest {
        content_type: ContentType::Quiz,
        course: body.course,
        topic: body.topic,
        subtopic: body.subtopic,
        description: body.description,
        time: String::new(),
        knowledge_level: String::new(),
    };

    let content = pipeline::run(state.llm.as_ref(), state.store.as_ref(), request).await?;
    Ok(Json(content))
}

/// POST /api/generate-resource
///
/// Generates a learning-resource list. Requires course, knowledge_level,
/// description and time.
pub async fn handle_resources(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ResourcesBody>,
) -> Result<Json<ParsedContent>, AppError> {
    let request = ContentRequest {
        content_type: ContentType::Resources,
        course: body.course,
        topic: String::new(),
        subtopic: String::new(),
        description: body.description,
        time: body.time,
        knowledge_level: body.knowledge_level,
    };

    let content = pipeline::run(state.llm.as_ref(), state.store.as_ref(), request).await?;
    Ok(Json(content))
}
