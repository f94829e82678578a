// taskcli/src/api/envelope.rs

use serde::{Deserialize, Serialize};

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `{status, message?, data?, error?}` as returned by every endpoint.
///
/// Transport and decoding failures are folded into the same shape by the
/// client, so callers only ever look at `status`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: None,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
                code: None,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Best available failure text.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .or(self.message.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }

    /// `Ok(data)` for a success carrying data, otherwise the failure text.
    pub fn into_result(self) -> Result<T, String> {
        match (self.status, self.data) {
            (Status::Success, Some(data)) => Ok(data),
            (Status::Success, None) => Err("response did not include data".to_string()),
            (Status::Error, _) => Err(Envelope::<()> {
                status: Status::Error,
                message: self.message,
                data: None,
                error: self.error,
            }
            .error_message()),
        }
    }
}
