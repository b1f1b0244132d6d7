// Mock interviews: question generation, per-answer evaluation and completion.
// An interview is in progress until `completedAt` is stamped; answers are
// rejected after that point.

pub mod evaluation;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod scoring;
pub mod store;
