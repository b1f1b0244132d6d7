//! Cover letter generation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coaching::prompts::{COVER_LETTER_PERSONA, COVER_LETTER_PROMPT};
use crate::errors::AppError;
use crate::llm_client::json::{deserialize_score, null_as_default};
use crate::llm_client::prompts::{fill_template, json_system, truncate_chars};
use crate::llm_client::{generate_json, GenerationSettings, LlmProvider};

const MAX_INPUT_CHARS: usize = 2000;
const COVER_LETTER_SETTINGS: GenerationSettings = GenerationSettings::new(0.7, 2000);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            &self.resume_text,
            &self.job_description,
            &self.company,
            &self.position,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation("All fields are required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_letter: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub match_score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlighted_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tips: Vec<String>,
}

pub fn build_cover_letter_prompt(request: &CoverLetterRequest) -> String {
    fill_template(
        COVER_LETTER_PROMPT,
        &[
            ("position", request.position.trim()),
            ("company", request.company.trim()),
            (
                "resume_text",
                truncate_chars(request.resume_text.trim(), MAX_INPUT_CHARS),
            ),
            (
                "job_description",
                truncate_chars(request.job_description.trim(), MAX_INPUT_CHARS),
            ),
        ],
    )
}

pub async fn generate_cover_letter(
    llm: &dyn LlmProvider,
    request: &CoverLetterRequest,
) -> Result<CoverLetter, AppError> {
    request.validate()?;
    info!(
        "Generating cover letter for {} at {}...",
        request.position.trim(),
        request.company.trim()
    );
    let letter: CoverLetter = generate_json(
        llm,
        &build_cover_letter_prompt(request),
        &json_system(COVER_LETTER_PERSONA),
        COVER_LETTER_SETTINGS,
    )
    .await
    .map_err(|e| AppError::llm("Failed to generate cover letter", e))?;

    if letter.cover_letter.trim().is_empty() {
        return Err(AppError::Llm(
            "Failed to generate cover letter: empty letter".to_string(),
        ));
    }
    Ok(letter)
}
