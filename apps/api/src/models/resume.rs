use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::to_utc;
use crate::llm_client::json::{deserialize_score, null_as_default};

pub const RESUMES: &str = "resumes";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSections {
    pub contact: SectionScore,
    pub experience: SectionScore,
    pub education: SectionScore,
    pub skills: SectionScore,
    pub projects: SectionScore,
    pub formatting: SectionScore,
}

/// ATS-style analysis produced by the model for one upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub overall_score: i32,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub ats_compatibility: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: ResumeSections,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvements: Vec<String>,
}

/// One uploaded resume: the extracted text snapshot and its analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub file_name: String,
    /// Absent when loaded through the history projection.
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub analysis: ResumeAnalysis,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Resume {
    pub fn new(
        user: ObjectId,
        file_name: String,
        raw_text: String,
        target_role: String,
        analysis: ResumeAnalysis,
    ) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            user,
            file_name,
            raw_text,
            target_role,
            analysis,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn collection(db: &Database) -> Collection<Resume> {
        db.collection(RESUMES)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub raw_text: String,
    pub target_role: String,
    pub analysis: ResumeAnalysis,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resume> for ResumeView {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id.to_hex(),
            file_name: resume.file_name,
            raw_text: resume.raw_text,
            target_role: resume.target_role,
            analysis: resume.analysis,
            created_at: to_utc(resume.created_at),
            updated_at: to_utc(resume.updated_at),
        }
    }
}

/// History entry: everything except the raw text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummaryView {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub target_role: String,
    pub analysis: ResumeAnalysis,
    pub created_at: DateTime<Utc>,
}

impl From<Resume> for ResumeSummaryView {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id.to_hex(),
            file_name: resume.file_name,
            target_role: resume.target_role,
            analysis: resume.analysis,
            created_at: to_utc(resume.created_at),
        }
    }
}
