use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::to_utc;

pub const JOBS: &str = "jobs";

/// Kanban column of a tracked application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Saved,
    Applied,
    Interviewing,
    Offered,
    Rejected,
    Accepted,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Saved,
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Offered,
        JobStatus::Rejected,
        JobStatus::Accepted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Saved => "saved",
            JobStatus::Applied => "applied",
            JobStatus::Interviewing => "interviewing",
            JobStatus::Offered => "offered",
            JobStatus::Rejected => "rejected",
            JobStatus::Accepted => "accepted",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("Invalid job status '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub applied_date: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Job {
    pub fn collection(db: &Database) -> Collection<Job> {
        db.collection(JOBS)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(rename = "_id")]
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub url: String,
    pub status: JobStatus,
    pub notes: String,
    pub applied_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobView {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_hex(),
            company: job.company,
            position: job.position,
            location: job.location,
            salary: job.salary,
            url: job.url,
            status: job.status,
            notes: job.notes,
            applied_date: job.applied_date.map(to_utc),
            created_at: to_utc(job.created_at),
            updated_at: to_utc(job.updated_at),
        }
    }
}
