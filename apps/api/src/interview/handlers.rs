//! Axum route handlers for the mock interview flow.

use axum::{extract::State, Json};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::interview::evaluation::{evaluate_answer, AnswerEvaluation};
use crate::interview::questions::{generate_questions, question_count};
use crate::interview::scoring::score_interview;
use crate::interview::store::{
    find_owned, insert_interview, list_recent, mark_completed, record_answer,
    refresh_user_rollups,
};
use crate::models::interview::{
    Difficulty, Interview, InterviewQuestion, InterviewType, InterviewView,
};
use crate::models::parse_object_id;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub role: String,
    #[serde(rename = "type", default)]
    pub interview_type: Option<InterviewType>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub question_count: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPrompt {
    pub question: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub interview_id: String,
    pub questions: Vec<QuestionPrompt>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub interview_id: Option<String>,
    pub question_index: Option<i64>,
    pub answer: Option<String>,
}

/// A submitted answer with every required field present.
#[derive(Debug, PartialEq)]
pub struct AnswerSubmission {
    pub interview_id: String,
    pub question_index: i64,
    pub answer: String,
}

impl SubmitAnswerRequest {
    pub fn validate(self) -> Result<AnswerSubmission, AppError> {
        match (self.interview_id, self.question_index, self.answer) {
            (Some(interview_id), Some(question_index), Some(answer))
                if !interview_id.trim().is_empty() && !answer.trim().is_empty() =>
            {
                Ok(AnswerSubmission {
                    interview_id,
                    question_index,
                    answer: answer.trim().to_string(),
                })
            }
            _ => Err(AppError::Validation("Missing required fields".to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInterviewRequest {
    pub interview_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInterviewResponse {
    pub overall_score: i32,
    pub feedback: String,
    pub questions: Vec<InterviewQuestion>,
    pub total_answered: usize,
    pub total_questions: usize,
}

/// Index into the question list, rejecting negatives and overruns.
pub fn checked_index(index: i64, len: usize) -> Result<usize, AppError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| AppError::Validation("Invalid question index".to_string()))
}

pub fn ensure_in_progress(interview: &Interview) -> Result<(), AppError> {
    if interview.is_completed() {
        return Err(AppError::Conflict(
            "Interview is already completed".to_string(),
        ));
    }
    Ok(())
}

/// Resolves the question an answer targets. Completed interviews are closed.
pub fn ensure_answerable(interview: &Interview, index: i64) -> Result<usize, AppError> {
    ensure_in_progress(interview)?;
    checked_index(index, interview.questions.len())
}

/// Rollups run after the completion is committed. Failures are logged, not returned.
fn rollups_refreshed(
    result: Result<(), AppError>,
    user_id: ObjectId,
    interview_id: ObjectId,
) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Interview {interview_id} completed but rollups for user {user_id} were not refreshed: {e}"
            );
            false
        }
    }
}

async fn load_interview(
    state: &AppState,
    auth: &AuthUser,
    raw_id: &str,
) -> Result<Interview, AppError> {
    let interview_id = parse_object_id(raw_id, "Interview")?;
    find_owned(&state.db, auth.id(), interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai/interview/start
///
/// Generates the question set and opens a new interview. Ideal answers are
/// stored but not returned.
pub async fn handle_start(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<StartInterviewRequest>,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let role = request.role.trim();
    if role.is_empty() {
        return Err(AppError::Validation(
            "Please specify a target role".to_string(),
        ));
    }
    let interview_type = request.interview_type.unwrap_or_default();
    let difficulty = request.difficulty.unwrap_or_default();
    let count = question_count(request.question_count);

    let generated =
        generate_questions(state.llm.as_ref(), role, interview_type, difficulty, count).await?;

    let interview = Interview::new(
        auth.id(),
        role.to_string(),
        interview_type,
        difficulty,
        generated
            .iter()
            .map(|q| InterviewQuestion::new(q.question.clone(), q.ideal_answer.clone()))
            .collect(),
    );
    insert_interview(&state.db, &interview).await?;
    info!(
        "Started interview {} with {} questions",
        interview.id,
        interview.questions.len()
    );

    Ok(Json(StartInterviewResponse {
        interview_id: interview.id.to_hex(),
        questions: generated
            .into_iter()
            .map(|q| QuestionPrompt {
                question: q.question,
                key_points: q.key_points,
            })
            .collect(),
    }))
}

/// POST /api/ai/interview/answer
///
/// Scores one answer and stores it on its question.
pub async fn handle_answer(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<SubmitAnswerRequest>,
) -> Result<Json<AnswerEvaluation>, AppError> {
    let submission = request.validate()?;
    let interview = load_interview(&state, &auth, &submission.interview_id).await?;
    let index = ensure_answerable(&interview, submission.question_index)?;

    info!("Evaluating answer for question {}...", index + 1);
    let evaluation = evaluate_answer(
        state.llm.as_ref(),
        &interview.questions[index].question,
        &submission.answer,
        &interview.role,
    )
    .await?;

    record_answer(
        &state.db,
        auth.id(),
        interview.id,
        index,
        &submission.answer,
        &evaluation,
    )
    .await?;

    Ok(Json(evaluation))
}

/// POST /api/ai/interview/complete
///
/// Computes the overall score, closes the interview and refreshes the
/// user's interview rollups.
pub async fn handle_complete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<CompleteInterviewRequest>,
) -> Result<Json<CompleteInterviewResponse>, AppError> {
    let raw_id = request
        .interview_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("interviewId is required".to_string()))?;
    let interview = load_interview(&state, &auth, &raw_id).await?;
    ensure_in_progress(&interview)?;

    let outcome = score_interview(&interview.questions);
    mark_completed(&state.db, auth.id(), interview.id, &outcome).await?;
    rollups_refreshed(
        refresh_user_rollups(&state.db, auth.id()).await,
        auth.id(),
        interview.id,
    );
    info!(
        "Completed interview {} with score {}",
        interview.id, outcome.overall_score
    );

    Ok(Json(CompleteInterviewResponse {
        overall_score: outcome.overall_score,
        feedback: outcome.feedback.to_string(),
        questions: interview.questions,
        total_answered: outcome.total_answered,
        total_questions: outcome.total_questions,
    }))
}

/// GET /api/ai/interview/history
pub async fn handle_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InterviewView>>, AppError> {
    let interviews = list_recent(&state.db, auth.id()).await?;
    Ok(Json(interviews.into_iter().map(InterviewView::from).collect()))
}
