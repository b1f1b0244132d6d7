//! Scoring of a single interview answer.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::prompts::{EVALUATION_PERSONA, EVALUATION_PROMPT};
use crate::llm_client::json::{deserialize_score, null_as_default};
use crate::llm_client::prompts::{fill_template, json_system, truncate_chars};
use crate::llm_client::{generate_json, GenerationSettings, LlmProvider};

const MAX_ANSWER_CHARS: usize = 4000;
const EVALUATION_SETTINGS: GenerationSettings = GenerationSettings::new(0.3, 1000);

/// Model verdict on one answer. Also the response body of the answer endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvaluation {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ideal_answer: String,
}

pub fn build_evaluation_prompt(question: &str, answer: &str, role: &str) -> String {
    fill_template(
        EVALUATION_PROMPT,
        &[
            ("role", role),
            ("question", question),
            ("answer", truncate_chars(answer.trim(), MAX_ANSWER_CHARS)),
        ],
    )
}

pub async fn evaluate_answer(
    llm: &dyn LlmProvider,
    question: &str,
    answer: &str,
    role: &str,
) -> Result<AnswerEvaluation, AppError> {
    let prompt = build_evaluation_prompt(question, answer, role);
    let evaluation: AnswerEvaluation = generate_json(
        llm,
        &prompt,
        &json_system(EVALUATION_PERSONA),
        EVALUATION_SETTINGS,
    )
    .await
    .map_err(|e| AppError::llm("Failed to evaluate answer", e))?;
    info!("Answer scored {}", evaluation.score);
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedLlm;

    #[test]
    fn test_prompt_embeds_question_and_answer() {
        let prompt = build_evaluation_prompt(
            "What is a mutex?",
            "  A lock guarding shared data.  ",
            "Systems Engineer",
        );
        assert!(prompt.contains(r#"Question: "What is a mutex?""#));
        assert!(prompt.contains(r#"Candidate Answer: "A lock guarding shared data.""#));
        assert!(prompt.contains("Systems Engineer role"));
    }

    #[test]
    fn test_prompt_leaves_braces_in_answer_alone() {
        let prompt = build_evaluation_prompt(
            "Explain {role}",
            "I'd template it as {role} and {question}",
            "Platform Engineer",
        );
        assert!(prompt.contains(r#"Question: "Explain {role}""#));
        assert!(prompt.contains("I'd template it as {role} and {question}"));
        assert_eq!(prompt.matches("Platform Engineer").count(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_normalizes_reply() {
        let llm = CannedLlm::replying(&[r#"{
            "score": 87.5,
            "feedback": "Solid answer.",
            "strengths": ["Precise"],
            "improvements": null,
            "idealAnswer": "A mutex provides mutual exclusion."
        }"#]);
        let evaluation = evaluate_answer(&llm, "What is a mutex?", "A lock.", "Engineer")
            .await
            .unwrap();
        assert_eq!(evaluation.score, 88);
        assert_eq!(evaluation.strengths, vec!["Precise"]);
        assert!(evaluation.improvements.is_empty());
        assert_eq!(evaluation.ideal_answer, "A mutex provides mutual exclusion.");
    }

    #[test]
    fn test_evaluation_serializes_camel_case() {
        let value = serde_json::to_value(AnswerEvaluation {
            score: 70,
            ideal_answer: "x".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["idealAnswer"], "x");
        assert_eq!(value["score"], 70);
    }
}
