//! ATS scoring of an extracted resume.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, json_system, truncate_chars};
use crate::llm_client::{generate_json, GenerationSettings, LlmProvider};
use crate::models::resume::ResumeAnalysis;
use crate::resume::prompts::{RESUME_ANALYSIS_PERSONA, RESUME_ANALYSIS_PROMPT};

pub const DEFAULT_TARGET_ROLE: &str = "Software Developer";
/// Resume text beyond this is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 5000;
const ANALYSIS_SETTINGS: GenerationSettings = GenerationSettings::new(0.3, 2000);

/// Form field first, then the profile's target role, then the default.
pub fn resolve_target_role(requested: Option<&str>, profile_role: &str) -> String {
    [requested.unwrap_or_default(), profile_role]
        .into_iter()
        .map(str::trim)
        .find(|r| !r.is_empty())
        .unwrap_or(DEFAULT_TARGET_ROLE)
        .to_string()
}

pub fn build_analysis_prompt(resume_text: &str, target_role: &str) -> String {
    fill_template(
        RESUME_ANALYSIS_PROMPT,
        &[
            ("target_role", target_role),
            ("resume_text", truncate_chars(resume_text, MAX_RESUME_CHARS)),
        ],
    )
}

pub async fn analyze_resume(
    llm: &dyn LlmProvider,
    resume_text: &str,
    target_role: &str,
) -> Result<ResumeAnalysis, AppError> {
    info!("Analyzing resume for {target_role} with {}", llm.model());
    let prompt = build_analysis_prompt(resume_text, target_role);
    generate_json(
        llm,
        &prompt,
        &json_system(RESUME_ANALYSIS_PERSONA),
        ANALYSIS_SETTINGS,
    )
    .await
    .map_err(|e| AppError::llm("Failed to analyze resume", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedLlm;

    #[test]
    fn test_target_role_resolution_order() {
        assert_eq!(resolve_target_role(Some("SRE"), "Backend"), "SRE");
        assert_eq!(resolve_target_role(Some("  "), "Backend"), "Backend");
        assert_eq!(resolve_target_role(None, ""), DEFAULT_TARGET_ROLE);
    }

    #[test]
    fn test_prompt_truncates_long_resumes() {
        let resume = format!("{}TAIL_MARKER", "a".repeat(MAX_RESUME_CHARS));
        let prompt = build_analysis_prompt(&resume, "Data Engineer");
        assert!(prompt.contains("Data Engineer"));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_analyze_resume_parses_fenced_reply() {
        let llm = CannedLlm::replying(&[r#"```json
{"overallScore": 81, "atsCompatibility": 77, "keywords": ["Rust"], "strengths": ["Concise"]}
```"#]);
        let analysis = analyze_resume(&llm, "Jane Doe, Rust engineer", "Backend Engineer")
            .await
            .unwrap();
        assert_eq!(analysis.overall_score, 81);
        assert_eq!(analysis.ats_compatibility, 77);
        assert_eq!(analysis.keywords, vec!["Rust"]);
        assert!(llm.last_prompt().contains("Jane Doe, Rust engineer"));
    }

    #[tokio::test]
    async fn test_analyze_resume_maps_failure_to_llm_error() {
        let llm = CannedLlm::replying(&["I am unable to score this resume."]);
        let result = analyze_resume(&llm, "text", "role").await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
