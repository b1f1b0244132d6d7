pub mod interview;
pub mod job;
pub mod resume;
pub mod user;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};

use crate::errors::AppError;

/// Parses a path id. Malformed ids are reported like a missing record so
/// callers cannot probe for the id format.
pub fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::NotFound(format!("{what} not found")))
}

pub(crate) fn to_utc(dt: bson::DateTime) -> DateTime<Utc> {
    dt.to_chrono()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_accepts_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "Job").unwrap(), id);
    }

    #[test]
    fn test_parse_object_id_rejects_garbage_as_not_found() {
        let err = parse_object_id("not-an-id", "Resume").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Resume not found"));
    }
}
