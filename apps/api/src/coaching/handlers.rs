use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::coaching::cover_letter::{generate_cover_letter, CoverLetter, CoverLetterRequest};
use crate::coaching::skill_gap::{analyze_skill_gap, SkillGapReport, SkillGapRequest};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/ai/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let letter = generate_cover_letter(state.llm.as_ref(), &request).await?;
    Ok(Json(letter))
}

/// POST /api/ai/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(request): AppJson<SkillGapRequest>,
) -> Result<Json<SkillGapReport>, AppError> {
    let (skills, target_role) = request.validate()?;
    let report = analyze_skill_gap(state.llm.as_ref(), &skills, &target_role).await?;
    Ok(Json(report))
}
