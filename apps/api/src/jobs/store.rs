use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::{Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    #[serde(rename = "_id")]
    pub status: String,
    pub count: i64,
}

pub fn list_filter(user_id: ObjectId, status: Option<JobStatus>) -> Document {
    let mut filter = doc! { "user": user_id };
    if let Some(status) = status {
        filter.insert("status", status.as_str());
    }
    filter
}

pub async fn list_jobs(
    db: &Database,
    user_id: ObjectId,
    status: Option<JobStatus>,
) -> Result<Vec<Job>, AppError> {
    let options = FindOptions::builder().sort(doc! { "updatedAt": -1 }).build();
    let cursor = Job::collection(db)
        .find(list_filter(user_id, status), options)
        .await?;
    Ok(cursor.try_collect().await?)
}

pub async fn insert_job(db: &Database, job: &Job) -> Result<(), AppError> {
    Job::collection(db).insert_one(job, None).await?;
    Ok(())
}

pub async fn find_owned(
    db: &Database,
    user_id: ObjectId,
    job_id: ObjectId,
) -> Result<Option<Job>, AppError> {
    Ok(Job::collection(db)
        .find_one(doc! { "_id": job_id, "user": user_id }, None)
        .await?)
}

/// Writes the whole job back. Returns false when it no longer exists.
pub async fn replace_owned(db: &Database, job: &Job) -> Result<bool, AppError> {
    let result = Job::collection(db)
        .replace_one(doc! { "_id": job.id, "user": job.user }, job, None)
        .await?;
    Ok(result.matched_count > 0)
}

pub async fn delete_owned(
    db: &Database,
    user_id: ObjectId,
    job_id: ObjectId,
) -> Result<bool, AppError> {
    let result = Job::collection(db)
        .delete_one(doc! { "_id": job_id, "user": user_id }, None)
        .await?;
    Ok(result.deleted_count > 0)
}

pub fn status_pipeline(user_id: ObjectId) -> Vec<Document> {
    vec![
        doc! { "$match": { "user": user_id } },
        doc! { "$group": { "_id": "$status", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// Per-status counts plus the overall total.
pub async fn status_counts(
    db: &Database,
    user_id: ObjectId,
) -> Result<(Vec<StatusCount>, u64), AppError> {
    let jobs = Job::collection(db);
    let mut cursor = jobs.aggregate(status_pipeline(user_id), None).await?;
    let mut stats = Vec::new();
    while let Some(row) = cursor.try_next().await? {
        let count: StatusCount = bson::from_document(row)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Malformed job stats row: {e}")))?;
        stats.push(count);
    }
    let total = jobs.count_documents(doc! { "user": user_id }, None).await?;
    Ok((stats, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_with_status() {
        let user = ObjectId::new();
        let filter = list_filter(user, Some(JobStatus::Interviewing));
        assert_eq!(filter.get_object_id("user").unwrap(), user);
        assert_eq!(filter.get_str("status").unwrap(), "interviewing");
        assert!(!list_filter(user, None).contains_key("status"));
    }

    #[test]
    fn test_status_pipeline_groups_by_status() {
        let pipeline = status_pipeline(ObjectId::new());
        let group = pipeline[1].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$status");
    }

    #[test]
    fn test_stats_row_decodes_int32_count() {
        let row = doc! { "_id": "applied", "count": 3_i32 };
        let count: StatusCount = bson::from_document(row).unwrap();
        assert_eq!(
            count,
            StatusCount {
                status: "applied".into(),
                count: 3
            }
        );
        assert_eq!(
            serde_json::to_value(&count).unwrap(),
            serde_json::json!({"_id": "applied", "count": 3})
        );
    }
}
