use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::to_utc;

pub const USERS: &str = "users";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Fresher,
    Junior,
    Mid,
    Senior,
    Lead,
}

/// A CareerLens user. The rollup fields are refreshed after resume analysis
/// and interview completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume_score: i32,
    #[serde(default)]
    pub interviews_taken: i32,
    #[serde(default)]
    pub avg_interview_score: i32,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            name,
            email,
            target_role: String::new(),
            experience_level: ExperienceLevel::default(),
            skills: Vec::new(),
            resume_score: 0,
            interviews_taken: 0,
            avg_interview_score: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn collection(db: &Database) -> Collection<User> {
        db.collection(USERS)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub target_role: String,
    pub experience_level: ExperienceLevel,
    pub skills: Vec<String>,
    pub resume_score: i32,
    pub interviews_taken: i32,
    pub avg_interview_score: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            target_role: user.target_role,
            experience_level: user.experience_level,
            skills: user.skills,
            resume_score: user.resume_score,
            interviews_taken: user.interviews_taken,
            avg_interview_score: user.avg_interview_score,
            created_at: to_utc(user.created_at),
        }
    }
}
