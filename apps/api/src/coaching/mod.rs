// Stateless coaching tools: cover letters and skill-gap analysis.
// Nothing here is persisted.

pub mod cover_letter;
pub mod handlers;
pub mod prompts;
pub mod skill_gap;
