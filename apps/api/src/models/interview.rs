use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::to_utc;

pub const INTERVIEWS: &str = "interviews";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Technical,
    Behavioral,
    SystemDesign,
    #[default]
    Mixed,
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::SystemDesign => "system-design",
            InterviewType::Mixed => "mixed",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(default)]
    pub ideal_answer: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub ai_feedback: String,
    #[serde(default)]
    pub score: i32,
}

impl InterviewQuestion {
    pub fn new(question: String, ideal_answer: String) -> Self {
        Self {
            question,
            ideal_answer,
            ..Default::default()
        }
    }

    /// Counted toward the overall score only once answered and scored.
    pub fn is_answered(&self) -> bool {
        !self.user_answer.trim().is_empty() && self.score > 0
    }
}

/// A mock interview session. `completed_at` stays `None` while the
/// candidate is still answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub role: String,
    #[serde(rename = "type", default)]
    pub interview_type: InterviewType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub overall_score: i32,
    #[serde(default)]
    pub overall_feedback: String,
    #[serde(default)]
    pub completed_at: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Interview {
    pub fn new(
        user: ObjectId,
        role: String,
        interview_type: InterviewType,
        difficulty: Difficulty,
        questions: Vec<InterviewQuestion>,
    ) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            user,
            role,
            interview_type,
            difficulty,
            questions,
            overall_score: 0,
            overall_feedback: String::new(),
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn collection(db: &Database) -> Collection<Interview> {
        db.collection(INTERVIEWS)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewView {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub difficulty: Difficulty,
    pub questions: Vec<InterviewQuestion>,
    pub overall_score: i32,
    pub overall_feedback: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Interview> for InterviewView {
    fn from(interview: Interview) -> Self {
        Self {
            id: interview.id.to_hex(),
            role: interview.role,
            interview_type: interview.interview_type,
            difficulty: interview.difficulty,
            questions: interview.questions,
            overall_score: interview.overall_score,
            overall_feedback: interview.overall_feedback,
            completed_at: interview.completed_at.map(to_utc),
            created_at: to_utc(interview.created_at),
        }
    }
}
