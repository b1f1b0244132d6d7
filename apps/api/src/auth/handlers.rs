use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::{self, doc, Document};
use serde::Deserialize;
use tracing::info;

use crate::auth::store::{insert_user, update_user};
use crate::auth::validation::{clean_skills, normalize_email, normalize_name};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::{ExperienceLevel, User, UserView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl RegisterRequest {
    fn into_user(self) -> Result<User, AppError> {
        let mut user = User::new(normalize_name(&self.name)?, normalize_email(&self.email)?);
        user.target_role = self.target_role.unwrap_or_default().trim().to_string();
        user.experience_level = self.experience_level.unwrap_or_default();
        user.skills = clean_skills(self.skills);
        Ok(user)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub target_role: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub skills: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Builds the `$set` body. Only supplied fields are touched.
    fn to_set_document(&self) -> Result<Document, AppError> {
        let mut set = doc! { "updatedAt": bson::DateTime::now() };
        if let Some(name) = &self.name {
            set.insert("name", normalize_name(name)?);
        }
        if let Some(role) = &self.target_role {
            set.insert("targetRole", role.trim());
        }
        if let Some(level) = self.experience_level {
            set.insert(
                "experienceLevel",
                bson::to_bson(&level).map_err(|e| AppError::Internal(e.into()))?,
            );
        }
        if let Some(skills) = &self.skills {
            set.insert("skills", clean_skills(skills));
        }
        Ok(set)
    }
}

/// POST /api/auth/register
///
/// Creates the profile for a gateway-authenticated identity.
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let user = request.into_user()?;
    insert_user(&state.db, &user).await?;
    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(UserView::from(user))))
}

/// GET /api/auth/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(UserView::from(user))
}

/// PUT /api/auth/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Result<Json<UserView>, AppError> {
    let set = update.to_set_document()?;
    let user = update_user(&state.db, auth.id(), set)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(UserView::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_normalizes_fields() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name": " Ada ", "email": "ADA@example.com", "targetRole": " Backend Engineer ",
                "experienceLevel": "senior", "skills": ["Rust", "rust", " Go "]}"#,
        )
        .unwrap();
        let user = request.into_user().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.target_role, "Backend Engineer");
        assert_eq!(user.experience_level, ExperienceLevel::Senior);
        assert_eq!(user.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"name": "Ada", "email": "nope"}"#).unwrap();
        assert!(matches!(request.into_user(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_register_missing_fields_fail_validation() {
        let request: RegisterRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert!(matches!(request.into_user(), Err(AppError::Validation(_))));

        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(request.into_user(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_profile_update_only_sets_supplied_fields() {
        let update = ProfileUpdate {
            target_role: Some(" Data Engineer ".into()),
            experience_level: Some(ExperienceLevel::Mid),
            ..Default::default()
        };
        let set = update.to_set_document().unwrap();
        assert_eq!(set.get_str("targetRole").unwrap(), "Data Engineer");
        assert_eq!(set.get_str("experienceLevel").unwrap(), "mid");
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("skills"));
    }

    #[test]
    fn test_profile_update_rejects_blank_name() {
        let update = ProfileUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(update.to_set_document().is_err());
    }
}
