//! Interview question generation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::prompts::{QUESTIONS_PERSONA, QUESTIONS_PROMPT};
use crate::llm_client::json::null_as_default;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::{generate_json, GenerationSettings, LlmProvider};
use crate::models::interview::{Difficulty, InterviewType};

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 10;
const QUESTION_SETTINGS: GenerationSettings = GenerationSettings::new(0.7, 3000);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ideal_answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
}

/// Models return either a bare array or an object wrapping one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionsPayload {
    List(Vec<GeneratedQuestion>),
    Wrapped { questions: Vec<GeneratedQuestion> },
}

impl QuestionsPayload {
    fn into_questions(self) -> Vec<GeneratedQuestion> {
        match self {
            QuestionsPayload::List(questions) | QuestionsPayload::Wrapped { questions } => {
                questions
            }
        }
    }
}

/// Missing or zero -> default; otherwise clamped to 1..=MAX_QUESTION_COUNT.
pub fn question_count(requested: Option<i64>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_QUESTION_COUNT,
        Some(n) => n.clamp(1, MAX_QUESTION_COUNT as i64) as usize,
    }
}

pub fn build_questions_prompt(
    role: &str,
    interview_type: InterviewType,
    difficulty: Difficulty,
    count: usize,
) -> String {
    let (count, difficulty, interview_type) = (
        count.to_string(),
        difficulty.to_string(),
        interview_type.to_string(),
    );
    fill_template(
        QUESTIONS_PROMPT,
        &[
            ("count", count.as_str()),
            ("difficulty", difficulty.as_str()),
            ("interview_type", interview_type.as_str()),
            ("role", role),
        ],
    )
}

pub async fn generate_questions(
    llm: &dyn LlmProvider,
    role: &str,
    interview_type: InterviewType,
    difficulty: Difficulty,
    count: usize,
) -> Result<Vec<GeneratedQuestion>, AppError> {
    info!("Generating {count} {interview_type} questions for {role}...");
    let prompt = build_questions_prompt(role, interview_type, difficulty, count);
    let payload: QuestionsPayload = generate_json(
        llm,
        &prompt,
        &json_system(QUESTIONS_PERSONA),
        QUESTION_SETTINGS,
    )
    .await
    .map_err(|e| AppError::llm("Failed to generate interview questions", e))?;

    let questions: Vec<GeneratedQuestion> = payload
        .into_questions()
        .into_iter()
        .filter(|q| !q.question.trim().is_empty())
        .take(count)
        .collect();

    if questions.is_empty() {
        return Err(AppError::Llm(
            "Failed to generate interview questions: model returned none".to_string(),
        ));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedLlm;

    #[test]
    fn test_question_count_bounds() {
        assert_eq!(question_count(None), 5);
        assert_eq!(question_count(Some(0)), 5);
        assert_eq!(question_count(Some(3)), 3);
        assert_eq!(question_count(Some(25)), 10);
        assert_eq!(question_count(Some(-4)), 1);
    }

    #[test]
    fn test_prompt_mentions_every_parameter() {
        let prompt = build_questions_prompt(
            "Site Reliability Engineer",
            InterviewType::SystemDesign,
            Difficulty::Hard,
            4,
        );
        assert!(prompt.contains("exactly 4 hard-level system-design"));
        assert!(prompt.contains("Site Reliability Engineer"));
    }

    #[tokio::test]
    async fn test_generate_accepts_bare_array_and_caps_count() {
        let llm = CannedLlm::replying(&[r#"[
            {"question": "What is a closure?", "idealAnswer": "A function plus its environment.", "keyPoints": ["scope"]},
            {"question": "  ", "idealAnswer": "blank is dropped"},
            {"question": "Explain the event loop.", "keyPoints": null},
            {"question": "What is a promise?"}
        ]"#]);
        let questions = generate_questions(
            &llm,
            "Frontend Developer",
            InterviewType::Technical,
            Difficulty::Easy,
            2,
        )
        .await
        .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].key_points, vec!["scope"]);
        assert_eq!(questions[1].question, "Explain the event loop.");
        assert!(questions[1].key_points.is_empty());
    }

    #[tokio::test]
    async fn test_generate_accepts_wrapped_object() {
        let llm = CannedLlm::replying(&[
            r#"{"questions": [{"question": "Tell me about a conflict you resolved."}]}"#,
        ]);
        let questions = generate_questions(
            &llm,
            "Engineering Manager",
            InterviewType::Behavioral,
            Difficulty::Medium,
            5,
        )
        .await
        .unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].ideal_answer.is_empty());
    }

    #[tokio::test]
    async fn test_generate_with_no_usable_questions_fails() {
        let llm = CannedLlm::replying(&["[]"]);
        let result = generate_questions(
            &llm,
            "Developer",
            InterviewType::Mixed,
            Difficulty::Medium,
            5,
        )
        .await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
