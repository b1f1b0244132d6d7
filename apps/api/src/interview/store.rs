use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::info;

use crate::errors::AppError;
use crate::interview::evaluation::AnswerEvaluation;
use crate::interview::scoring::InterviewOutcome;
use crate::models::interview::Interview;
use crate::models::user::User;

pub const HISTORY_LIMIT: i64 = 20;

fn already_completed() -> AppError {
    AppError::Conflict("Interview is already completed".to_string())
}

pub async fn insert_interview(db: &Database, interview: &Interview) -> Result<(), AppError> {
    Interview::collection(db).insert_one(interview, None).await?;
    Ok(())
}

pub async fn find_owned(
    db: &Database,
    user_id: ObjectId,
    interview_id: ObjectId,
) -> Result<Option<Interview>, AppError> {
    Ok(Interview::collection(db)
        .find_one(doc! { "_id": interview_id, "user": user_id }, None)
        .await?)
}

pub async fn list_recent(db: &Database, user_id: ObjectId) -> Result<Vec<Interview>, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .limit(HISTORY_LIMIT)
        .build();
    let cursor = Interview::collection(db)
        .find(doc! { "user": user_id }, options)
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Matches the interview only while it is still in progress.
pub fn in_progress_filter(user_id: ObjectId, interview_id: ObjectId) -> Document {
    doc! { "_id": interview_id, "user": user_id, "completedAt": Bson::Null }
}

/// Positional `$set` for one question's answer, feedback and score.
pub fn answer_update(index: usize, answer: &str, evaluation: &AnswerEvaluation) -> Document {
    let prefix = format!("questions.{index}");
    let mut set = Document::new();
    set.insert(format!("{prefix}.userAnswer"), answer);
    set.insert(format!("{prefix}.aiFeedback"), evaluation.feedback.as_str());
    set.insert(format!("{prefix}.score"), evaluation.score);
    set.insert("updatedAt", bson::DateTime::now());
    doc! { "$set": set }
}

/// Persists an evaluated answer. Only in-progress interviews match, so an
/// interview completed concurrently reports `Conflict`.
pub async fn record_answer(
    db: &Database,
    user_id: ObjectId,
    interview_id: ObjectId,
    index: usize,
    answer: &str,
    evaluation: &AnswerEvaluation,
) -> Result<(), AppError> {
    let result = Interview::collection(db)
        .update_one(
            in_progress_filter(user_id, interview_id),
            answer_update(index, answer, evaluation),
            None,
        )
        .await?;
    if result.matched_count == 0 {
        return Err(already_completed());
    }
    Ok(())
}

/// Stamps the outcome and `completedAt`. Fails with `Conflict` if another
/// request completed the interview first.
pub async fn mark_completed(
    db: &Database,
    user_id: ObjectId,
    interview_id: ObjectId,
    outcome: &InterviewOutcome,
) -> Result<bson::DateTime, AppError> {
    let now = bson::DateTime::now();
    let result = Interview::collection(db)
        .update_one(
            in_progress_filter(user_id, interview_id),
            doc! {
                "$set": {
                    "overallScore": outcome.overall_score,
                    "overallFeedback": outcome.feedback,
                    "completedAt": now,
                    "updatedAt": now,
                }
            },
            None,
        )
        .await?;
    if result.matched_count == 0 {
        return Err(already_completed());
    }
    Ok(now)
}

/// Pipeline averaging `overallScore` over the user's completed interviews.
pub fn completed_average_pipeline(user_id: ObjectId) -> Vec<Document> {
    vec![
        doc! { "$match": { "user": user_id, "completedAt": { "$ne": Bson::Null } } },
        doc! { "$group": { "_id": Bson::Null, "avg": { "$avg": "$overallScore" } } },
    ]
}

/// Bumps `interviewsTaken` and recomputes `avgInterviewScore` after a completion.
pub async fn refresh_user_rollups(db: &Database, user_id: ObjectId) -> Result<(), AppError> {
    let mut cursor = Interview::collection(db)
        .aggregate(completed_average_pipeline(user_id), None)
        .await?;
    let avg = cursor
        .try_next()
        .await?
        .and_then(|d| d.get("avg").and_then(Bson::as_f64))
        .map(|avg| avg.round() as i32)
        .unwrap_or(0);

    User::collection(db)
        .update_one(
            doc! { "_id": user_id },
            doc! {
                "$inc": { "interviewsTaken": 1 },
                "$set": { "avgInterviewScore": avg, "updatedAt": bson::DateTime::now() },
            },
            None,
        )
        .await?;
    info!("Refreshed interview rollups for {user_id}: avg={avg}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_update_targets_one_question() {
        let evaluation = AnswerEvaluation {
            score: 65,
            feedback: "Decent".into(),
            ..Default::default()
        };
        let update = answer_update(2, "my answer", &evaluation);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("questions.2.userAnswer").unwrap(), "my answer");
        assert_eq!(set.get_str("questions.2.aiFeedback").unwrap(), "Decent");
        assert_eq!(set.get_i32("questions.2.score").unwrap(), 65);
        assert!(set.contains_key("updatedAt"));
        assert!(!set.keys().any(|k| k.starts_with("questions.0")));
    }

    #[test]
    fn test_in_progress_filter_is_owner_scoped_and_open_only() {
        let (user, interview) = (ObjectId::new(), ObjectId::new());
        let filter = in_progress_filter(user, interview);
        assert_eq!(filter.get_object_id("_id").unwrap(), interview);
        assert_eq!(filter.get_object_id("user").unwrap(), user);
        assert_eq!(filter.get("completedAt"), Some(&Bson::Null));
    }

    #[test]
    fn test_average_pipeline_only_counts_completed() {
        let user = ObjectId::new();
        let pipeline = completed_average_pipeline(user);
        let matcher = pipeline[0].get_document("$match").unwrap();
        assert_eq!(matcher.get_object_id("user").unwrap(), user);
        assert!(matcher
            .get_document("completedAt")
            .unwrap()
            .contains_key("$ne"));
        let group = pipeline[1].get_document("$group").unwrap();
        assert_eq!(
            group.get_document("avg").unwrap().get_str("$avg").unwrap(),
            "$overallScore"
        );
    }
}
