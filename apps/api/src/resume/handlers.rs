//! Axum route handlers for the Resume API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        Multipart, Path, State,
    },
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::auth::{store::set_resume_score, AuthUser};
use crate::errors::AppError;
use crate::models::parse_object_id;
use crate::models::resume::{Resume, ResumeAnalysis, ResumeSummaryView, ResumeView};
use crate::resume::analysis::{analyze_resume, resolve_target_role};
use crate::resume::pdf::{ensure_enough_text, extract_text, is_pdf};
use crate::resume::store::{find_owned, insert_resume, list_recent};
use crate::state::AppState;

const FILE_FIELD: &str = "resume";
const TARGET_ROLE_FIELD: &str = "targetRole";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeResponse {
    pub id: String,
    pub file_name: String,
    pub analysis: ResumeAnalysis,
}

/// The parts of the multipart form the analyzer cares about.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub target_role: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file: Option<(String, Option<String>, Bytes)> = None;
    let mut target_role = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((file_name, content_type, bytes));
            }
            Some(TARGET_ROLE_FIELD) => {
                target_role = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) = file
        .filter(|(_, _, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("Please upload a resume file (PDF)".to_string()))?;

    Ok(ResumeUpload {
        file_name,
        content_type,
        bytes,
        target_role,
    })
}

/// POST /api/resume/analyze
///
/// Multipart upload (`resume` file, optional `targetRole`). Extracts the text,
/// scores it, stores the snapshot and refreshes the user's resume score.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let upload = read_upload(multipart?).await?;
    if !is_pdf(upload.content_type.as_deref(), &upload.file_name) {
        return Err(AppError::Validation(
            "Only PDF resumes are supported".to_string(),
        ));
    }

    info!("Parsing PDF: {}", upload.file_name);
    let raw_text = extract_text(upload.bytes).await?;
    ensure_enough_text(&raw_text)?;

    let target_role = resolve_target_role(upload.target_role.as_deref(), &user.target_role);
    let analysis = analyze_resume(state.llm.as_ref(), &raw_text, &target_role).await?;

    let resume = Resume::new(
        user.id,
        upload.file_name,
        raw_text,
        target_role,
        analysis,
    );
    insert_resume(&state.db, &resume).await?;
    set_resume_score(&state.db, user.id, resume.analysis.overall_score).await?;

    Ok(Json(AnalyzeResumeResponse {
        id: resume.id.to_hex(),
        file_name: resume.file_name,
        analysis: resume.analysis,
    }))
}

/// GET /api/resume/history
pub async fn handle_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ResumeSummaryView>>, AppError> {
    let resumes = list_recent(&state.db, auth.id()).await?;
    Ok(Json(resumes.into_iter().map(ResumeSummaryView::from).collect()))
}

/// GET /api/resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ResumeView>, AppError> {
    let resume_id = parse_object_id(&id, "Resume")?;
    let resume = find_owned(&state.db, auth.id(), resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(ResumeView::from(resume)))
}
