use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;

use crate::errors::AppError;
use crate::models::user::User;

const DUPLICATE_KEY: i32 = 11000;

pub async fn find_user(db: &Database, user_id: ObjectId) -> Result<Option<User>, AppError> {
    Ok(User::collection(db)
        .find_one(doc! { "_id": user_id }, None)
        .await?)
}

/// Inserts a new user. A taken email maps to `Conflict`.
pub async fn insert_user(db: &Database, user: &User) -> Result<(), AppError> {
    match User::collection(db).insert_one(user, None).await {
        Ok(_) => Ok(()),
        Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(format!(
            "An account with email {} already exists",
            user.email
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Applies a `$set` to the user and returns the updated document.
pub async fn update_user(
    db: &Database,
    user_id: ObjectId,
    set: Document,
) -> Result<Option<User>, AppError> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    Ok(User::collection(db)
        .find_one_and_update(doc! { "_id": user_id }, doc! { "$set": set }, options)
        .await?)
}

/// Records the score of the user's latest resume analysis.
pub async fn set_resume_score(db: &Database, user_id: ObjectId, score: i32) -> Result<(), AppError> {
    User::collection(db)
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "resumeScore": score, "updatedAt": mongodb::bson::DateTime::now() } },
            None,
        )
        .await?;
    Ok(())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY
    )
}
