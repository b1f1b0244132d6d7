use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use mongodb::bson::oid::ObjectId;
use tracing::warn;

use crate::auth::store::find_user;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, loaded from the users collection.
/// Rejects with 401 when the header is missing, malformed or stale.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> ObjectId {
        self.0.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = user_id_from_headers(&parts.headers)?;
        match find_user(&state.db, user_id).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                warn!("Rejected request for unknown user {user_id}");
                Err(AppError::Unauthorized)
            }
        }
    }
}

pub fn user_id_from_headers(headers: &HeaderMap) -> Result<ObjectId, AppError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;
    ObjectId::parse_str(raw).map_err(|_| AppError::Unauthorized)
}
