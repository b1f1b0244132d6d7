use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use mongodb::Database;

use crate::errors::AppError;
use crate::models::resume::Resume;

pub const HISTORY_LIMIT: i64 = 10;

pub async fn insert_resume(db: &Database, resume: &Resume) -> Result<(), AppError> {
    Resume::collection(db).insert_one(resume, None).await?;
    Ok(())
}

/// Newest resumes first, without the raw text.
pub async fn list_recent(db: &Database, user_id: ObjectId) -> Result<Vec<Resume>, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .limit(HISTORY_LIMIT)
        .projection(doc! { "rawText": 0 })
        .build();
    let cursor = Resume::collection(db)
        .find(doc! { "user": user_id }, options)
        .await?;
    Ok(cursor.try_collect().await?)
}

pub async fn find_owned(
    db: &Database,
    user_id: ObjectId,
    resume_id: ObjectId,
) -> Result<Option<Resume>, AppError> {
    Ok(Resume::collection(db)
        .find_one(doc! { "_id": resume_id, "user": user_id }, None)
        .await?)
}
