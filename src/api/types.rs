use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};

/// Standard `{ success, message, data }` response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Acknowledgement of a mutation; the payload is not needed by callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
        }
    }
}

/// Body of a non-success response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "field_errors")]
    pub errors: Vec<FieldError>,
}

/// Only an array of error objects counts; `null` or any other shape is ignored
/// so the top-level `message` still gets through.
fn field_errors<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FieldError>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_error(self, status: u16) -> ApiError {
        let errors: Vec<String> = self
            .errors
            .into_iter()
            .filter_map(|e| e.message.or(e.msg))
            .filter(|text| !text.is_empty())
            .collect();

        if errors.is_empty() {
            ApiError::Server {
                status,
                message: self.message.unwrap_or_default(),
            }
        } else {
            ApiError::Validation {
                message: self.message,
                errors,
            }
        }
    }
}

/// `data.property` wrapper used by single-listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyData<T> {
    pub property: T,
}

/// `data.user` wrapper used by the profile endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UserData<T> {
    pub user: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_errors_become_validation() {
        let body: ErrorBody = serde_json::from_value(json!({
            "message": "Validation failed",
            "errors": [{ "msg": "Title too short" }, { "message": "Invalid pincode" }]
        }))
        .unwrap();

        match body.into_error(400) {
            ApiError::Validation { errors, .. } => {
                assert_eq!(errors, vec!["Title too short", "Invalid pincode"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_message_becomes_server_error() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "Not allowed" })).unwrap();
        match body.into_error(403) {
            ApiError::Server { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Not allowed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_or_odd_errors_keep_the_message() {
        for errors in [json!(null), json!("Title too short"), json!({ "title": "missing" })] {
            let body: ErrorBody = serde_json::from_value(json!({
                "message": "Property not found",
                "errors": errors
            }))
            .unwrap();
            assert_eq!(body.into_error(404).notification("fallback"), "Property not found");
        }
    }

    #[test]
    fn unusable_error_entries_are_skipped() {
        let body: ErrorBody = serde_json::from_value(json!({
            "errors": ["plain text", { "msg": "Price is required" }]
        }))
        .unwrap();
        match body.into_error(422) {
            ApiError::Validation { errors, .. } => assert_eq!(errors, vec!["Price is required"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
