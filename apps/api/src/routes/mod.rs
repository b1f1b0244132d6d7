pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{auth, coaching, interview, jobs, resume};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        // Accounts
        .route("/api/auth/register", post(auth::handlers::handle_register))
        .route("/api/auth/me", get(auth::handlers::handle_me))
        .route(
            "/api/auth/profile",
            put(auth::handlers::handle_update_profile),
        )
        // Resume analysis
        .route(
            "/api/resume/analyze",
            post(resume::handlers::handle_analyze),
        )
        .route(
            "/api/resume/history",
            get(resume::handlers::handle_history),
        )
        .route("/api/resume/:id", get(resume::handlers::handle_get_resume))
        // Mock interviews
        .route(
            "/api/ai/interview/start",
            post(interview::handlers::handle_start),
        )
        .route(
            "/api/ai/interview/answer",
            post(interview::handlers::handle_answer),
        )
        .route(
            "/api/ai/interview/complete",
            post(interview::handlers::handle_complete),
        )
        .route(
            "/api/ai/interview/history",
            get(interview::handlers::handle_history),
        )
        // Coaching
        .route(
            "/api/ai/cover-letter",
            post(coaching::handlers::handle_cover_letter),
        )
        .route(
            "/api/ai/skill-gap",
            post(coaching::handlers::handle_skill_gap),
        )
        // Job board (stats before :id)
        .route(
            "/api/jobs/stats/overview",
            get(jobs::handlers::handle_stats),
        )
        .route(
            "/api/jobs",
            get(jobs::handlers::handle_list).post(jobs::handlers::handle_create),
        )
        .route(
            "/api/jobs/:id",
            put(jobs::handlers::handle_update).delete(jobs::handlers::handle_delete),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mongodb::options::ClientOptions;
    use mongodb::Client;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::extractor::USER_ID_HEADER;
    use crate::config::Config;
    use crate::llm_client::testing::CannedLlm;

    /// State whose Mongo client never dials out unless a handler queries it.
    async fn test_state() -> AppState {
        let config = Config::for_tests();
        let options = ClientOptions::parse(&config.mongodb_uri).await.unwrap();
        let client = Client::with_options(options).unwrap();
        AppState {
            db: client.database(&config.mongodb_database),
            llm: Arc::new(CannedLlm::replying(&[])),
            config,
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state().await)
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let (status, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "CareerLens API is live!");
        assert_eq!(body["status"], "Running");
    }

    #[tokio::test]
    async fn test_health_reports_environment() {
        let (status, body) =
            send(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["environment"], "test");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_protected_route_requires_user_header() {
        let (status, body) =
            send(Request::get("/api/jobs").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_malformed_user_header_is_rejected() {
        let request = Request::post("/api/ai/skill-gap")
            .header(USER_ID_HEADER, "not-an-object-id")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"skills": ["Rust"], "targetRole": "SRE"}"#))
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn register(body: &'static str) -> Request<Body> {
        Request::post("/api/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_missing_email_is_json_validation_error() {
        let (status, body) = send(register(r#"{"name": "Ada"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_json_error() {
        let (status, body) = send(register(r#"{"name": "#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_enum_value_is_json_error() {
        let (status, body) = send(register(
            r#"{"name": "Ada", "email": "ada@example.com", "experienceLevel": "guru"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
        assert!(body["error"].as_str().unwrap().contains("guru"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_json_error() {
        let request = Request::post("/api/auth/register")
            .body(Body::from(r#"{"name": "Ada"}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) =
            send(Request::get("/api/nowhere").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
