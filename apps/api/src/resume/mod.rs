// Resume analysis: PDF upload -> text extraction -> ATS scoring via the LLM.
// All LLM calls go through llm_client.

pub mod analysis;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod store;
