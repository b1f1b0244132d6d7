//! Skill-gap analysis against a target role.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::validation::clean_skills;
use crate::coaching::prompts::{SKILL_GAP_PERSONA, SKILL_GAP_PROMPT};
use crate::errors::AppError;
use crate::llm_client::json::{deserialize_score, null_as_default};
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::{generate_json, GenerationSettings, LlmProvider};

const SKILL_GAP_SETTINGS: GenerationSettings = GenerationSettings::new(0.5, 2000);

/// Skills arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillsInput {
    pub fn into_skills(self) -> Vec<String> {
        match self {
            SkillsInput::List(list) => clean_skills(list),
            SkillsInput::Csv(csv) => clean_skills(csv.split(',')),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    pub skills: Option<SkillsInput>,
    #[serde(default)]
    pub target_role: String,
}

impl SkillGapRequest {
    /// Returns the cleaned skill list and trimmed role.
    pub fn validate(self) -> Result<(Vec<String>, String), AppError> {
        let skills = self.skills.map(SkillsInput::into_skills).unwrap_or_default();
        let role = self.target_role.trim().to_string();
        if skills.is_empty() || role.is_empty() {
            return Err(AppError::Validation(
                "Skills and target role are required".to_string(),
            ));
        }
        Ok((skills, role))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapReport {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub match_percentage: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strong_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_critical: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_nice_to_have: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub learning_path: Vec<LearningStep>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roadmap: String,
}

pub fn build_skill_gap_prompt(skills: &[String], target_role: &str) -> String {
    let skills = skills.join(", ");
    fill_template(
        SKILL_GAP_PROMPT,
        &[("target_role", target_role), ("skills", skills.as_str())],
    )
}

pub async fn analyze_skill_gap(
    llm: &dyn LlmProvider,
    skills: &[String],
    target_role: &str,
) -> Result<SkillGapReport, AppError> {
    info!("Analyzing skill gap for {target_role}...");
    generate_json(
        llm,
        &build_skill_gap_prompt(skills, target_role),
        &json_system(SKILL_GAP_PERSONA),
        SKILL_GAP_SETTINGS,
    )
    .await
    .map_err(|e| AppError::llm("Failed to analyze skill gap", e))
}
