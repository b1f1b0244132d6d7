//! Request shapes for the job board and the rules for applying them.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{Job, JobStatus};

fn required(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(
            "Company and position are required".to_string(),
        ));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewJob {
    pub fn into_job(self, user: ObjectId) -> Result<Job, AppError> {
        let company = required(&self.company)?;
        let position = required(&self.position)?;
        let status = self.status.unwrap_or_default();
        let now = bson::DateTime::now();
        Ok(Job {
            id: ObjectId::new(),
            user,
            company,
            position,
            location: self.location.unwrap_or_default(),
            salary: self.salary.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            status,
            notes: self.notes.unwrap_or_default(),
            applied_date: (status == JobStatus::Applied).then_some(now),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
    pub applied_date: Option<DateTime<Utc>>,
}

impl JobUpdate {
    pub fn apply(self, job: &mut Job) -> Result<(), AppError> {
        if let Some(company) = self.company {
            job.company = required(&company)?;
        }
        if let Some(position) = self.position {
            job.position = required(&position)?;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        if let Some(url) = self.url {
            job.url = url;
        }
        if let Some(notes) = self.notes {
            job.notes = notes;
        }
        let now = bson::DateTime::now();
        if let Some(applied) = self.applied_date {
            job.applied_date = Some(bson::DateTime::from_chrono(applied));
        }
        if let Some(status) = self.status {
            if status == JobStatus::Applied && job.applied_date.is_none() {
                job.applied_date = Some(now);
            }
            job.status = status;
        }
        job.updated_at = now;
        Ok(())
    }
}

/// Parses the optional `?status=` filter. Blank means no filter.
pub fn status_filter(raw: Option<&str>) -> Result<Option<JobStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(AppError::Validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_job() -> Job {
        NewJob {
            company: "Acme".into(),
            position: "Engineer".into(),
            ..Default::default()
        }
        .into_job(ObjectId::new())
        .unwrap()
    }

    #[test]
    fn test_new_job_defaults() {
        let job = saved_job();
        assert_eq!(job.status, JobStatus::Saved);
        assert!(job.applied_date.is_none());
        assert_eq!(job.location, "");
    }

    #[test]
    fn test_new_applied_job_is_stamped() {
        let job = NewJob {
            company: " Acme ".into(),
            position: "Engineer".into(),
            status: Some(JobStatus::Applied),
            ..Default::default()
        }
        .into_job(ObjectId::new())
        .unwrap();
        assert_eq!(job.company, "Acme");
        assert!(job.applied_date.is_some());
    }

    #[test]
    fn test_new_job_requires_company_and_position() {
        let result = NewJob {
            company: "Acme".into(),
            ..Default::default()
        }
        .into_job(ObjectId::new());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_moves_to_applied_once() {
        let mut job = saved_job();
        let update: JobUpdate = serde_json::from_str(r#"{"status": "applied"}"#).unwrap();
        update.apply(&mut job).unwrap();
        assert_eq!(job.status, JobStatus::Applied);
        let first_stamp = job.applied_date.unwrap();

        let update: JobUpdate = serde_json::from_str(r#"{"status": "interviewing"}"#).unwrap();
        update.apply(&mut job).unwrap();
        let update: JobUpdate = serde_json::from_str(r#"{"status": "applied"}"#).unwrap();
        update.apply(&mut job).unwrap();
        assert_eq!(job.applied_date.unwrap(), first_stamp);
    }

    #[test]
    fn test_update_leaves_absent_fields() {
        let mut job = saved_job();
        let update: JobUpdate = serde_json::from_str(r#"{"notes": "Call back Friday"}"#).unwrap();
        update.apply(&mut job).unwrap();
        assert_eq!(job.notes, "Call back Friday");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.status, JobStatus::Saved);
    }

    #[test]
    fn test_update_rejects_blank_position() {
        let mut job = saved_job();
        let update: JobUpdate = serde_json::from_str(r#"{"position": "  "}"#).unwrap();
        assert!(update.apply(&mut job).is_err());
    }

    #[test]
    fn test_update_rejects_unknown_status() {
        assert!(serde_json::from_str::<JobUpdate>(r#"{"status": "ghosted"}"#).is_err());
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(status_filter(None).unwrap(), None);
        assert_eq!(status_filter(Some(" ")).unwrap(), None);
        assert_eq!(
            status_filter(Some("Offered")).unwrap(),
            Some(JobStatus::Offered)
        );
        assert!(matches!(
            status_filter(Some("ghosted")),
            Err(AppError::Validation(_))
        ));
    }
}
