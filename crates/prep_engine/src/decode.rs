use chrono::DateTime;
use prep_core::{HealthStatus, InterviewRecord};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body is not valid JSON: {0}")]
    Syntax(String),
    #[error("JSON does not match the expected shape: {0}")]
    Shape(String),
    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Decode and validate an interview research document.
///
/// Structure is checked by serde; afterwards the fields the pages key on
/// (`company_name`, `role`, `interview_date`) are checked for content.
pub fn decode_record(bytes: &[u8]) -> Result<InterviewRecord, DecodeError> {
    let record: InterviewRecord = decode_json(bytes)?;
    validate_record(&record)?;
    Ok(record)
}

pub fn decode_health(bytes: &[u8]) -> Result<HealthStatus, DecodeError> {
    decode_json(bytes)
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|err| match err.classify() {
        Category::Data => DecodeError::Shape(err.to_string()),
        Category::Io | Category::Syntax | Category::Eof => DecodeError::Syntax(err.to_string()),
    })
}

fn validate_record(record: &InterviewRecord) -> Result<(), DecodeError> {
    let info = &record.interview_info;
    if info.company_name.trim().is_empty() {
        return Err(DecodeError::Invalid {
            field: "interview_info.company_name",
            reason: "must not be blank".into(),
        });
    }
    if info.role.trim().is_empty() {
        return Err(DecodeError::Invalid {
            field: "interview_info.role",
            reason: "must not be blank".into(),
        });
    }
    DateTime::parse_from_rfc3339(info.interview_date.trim()).map_err(|err| {
        DecodeError::Invalid {
            field: "interview_info.interview_date",
            reason: format!("{:?} is not an RFC 3339 timestamp ({err})", info.interview_date),
        }
    })?;
    Ok(())
}
