// The Generative Content Pipeline: request validation, prompt building, model
// invocation, response parsing, and best-effort content logging.
// All model calls go through llm_client — no direct provider calls here.

pub mod content;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod store;
