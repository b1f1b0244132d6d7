use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::jobs::board::{status_filter, JobUpdate, NewJob};
use crate::jobs::store::{
    delete_owned, find_owned, insert_job, list_jobs, replace_owned, status_counts, StatusCount,
};
use crate::models::job::JobView;
use crate::models::parse_object_id;
use crate::state::AppState;

fn job_not_found() -> AppError {
    AppError::NotFound("Job not found".to_string())
}

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobStats {
    pub stats: Vec<StatusCount>,
    pub total: u64,
}

/// GET /api/jobs
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let status = status_filter(query.status.as_deref())?;
    let jobs = list_jobs(&state.db, auth.id(), status).await?;
    Ok(Json(jobs.into_iter().map(JobView::from).collect()))
}

/// POST /api/jobs
pub async fn handle_create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<NewJob>,
) -> Result<(StatusCode, Json<JobView>), AppError> {
    let job = request.into_job(auth.id())?;
    insert_job(&state.db, &job).await?;
    info!("Tracked job {} ({} at {})", job.id, job.position, job.company);
    Ok((StatusCode::CREATED, Json(JobView::from(job))))
}

/// PUT /api/jobs/:id
pub async fn handle_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    AppJson(update): AppJson<JobUpdate>,
) -> Result<Json<JobView>, AppError> {
    let job_id = parse_object_id(&id, "Job")?;
    let mut job = find_owned(&state.db, auth.id(), job_id)
        .await?
        .ok_or_else(job_not_found)?;
    update.apply(&mut job)?;
    if !replace_owned(&state.db, &job).await? {
        return Err(job_not_found());
    }
    Ok(Json(JobView::from(job)))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let job_id = parse_object_id(&id, "Job")?;
    if !delete_owned(&state.db, auth.id(), job_id).await? {
        return Err(job_not_found());
    }
    Ok(Json(json!({ "message": "Job removed successfully" })))
}

/// GET /api/jobs/stats/overview
pub async fn handle_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<JobStats>, AppError> {
    let (stats, total) = status_counts(&state.db, auth.id()).await?;
    Ok(Json(JobStats { stats, total }))
}
