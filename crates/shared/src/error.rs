use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body the server attaches to a non-success response.
///
/// `detail` is kept loosely typed: validation failures carry a list of
/// problems instead of a string, and only the string form is shown to users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    pub fn detail_message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .filter(|detail| !detail.is_empty())
    }

    /// Best-effort extraction from a raw response body.
    pub fn from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.detail_message().map(str::to_string))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("participant email is required")]
    MissingParticipant,
    #[error("no activity selected")]
    MissingActivity,
    #[error("unknown activity '{0}'")]
    UnknownActivity(String),
}
