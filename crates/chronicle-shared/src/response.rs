//! The uniform response envelope.
//!
//! Every endpoint answers with `{success, message?, ...payload}`; error
//! responses keep the same shape with `success: false`.

use serde::{Deserialize, Serialize};

/// Successful response wrapper. The payload's fields are flattened into the
/// envelope, so `Envelope::ok(BlogPayload { blog })` serializes as
/// `{"success": true, "blog": {..}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    pub fn ok_with_message(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload,
        }
    }
}

/// Payload for message-only responses (e.g. a successful delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empty {}

impl Envelope<Empty> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::ok_with_message(message, Empty {})
    }
}

/// Error response body. `errors` carries field-level validation messages;
/// `error` carries a diagnostic detail on 500s outside production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            error: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error = Some(detail.into());
        self
    }
}
