//! Uniform result envelope and response normalization
//!
//! ## Table of Contents
//! - **RawEnvelope**: Untyped normalized response record
//! - **ApiResponse**: Typed envelope returned by every service method
//!
//! The LearnHub backends answer in several envelope dialects:
//! `{success, message, body}`, `{success, message, data}`, or a bare JSON
//! payload. [`RawEnvelope::normalize`] folds all of them into one record so
//! callers only ever branch on `success` and read `data`.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default message when the backend did not provide one
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Untyped normalized response record.
///
/// Produced from an HTTP status and a raw JSON payload. The transform is
/// pure and total: any JSON value yields a well-formed envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope {
    /// Explicit backend `success` flag, else whether the status was 2xx
    pub success: bool,
    /// Backend `message` field, else `"Success"`
    pub message: String,
    /// Backend `body` field, else `data` field, else the whole payload
    pub data: Value,
    /// HTTP status the response arrived with
    pub status: u16,
}

impl RawEnvelope {
    /// Normalize a raw response payload into the uniform record.
    ///
    /// Field precedence (a `null` field counts as absent, matching the
    /// backends' envelope conventions):
    /// - `success`: explicit boolean `success` field, else `status` in 2xx
    /// - `message`: explicit string `message` field, else `"Success"`
    /// - `data`: `body` field, else `data` field, else the entire payload
    pub fn normalize(status: u16, payload: Value) -> Self {
        let success = payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or((200..300).contains(&status));

        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());

        let picked = match &payload {
            Value::Object(map) => map
                .get("body")
                .filter(|v| !v.is_null())
                .or_else(|| map.get("data").filter(|v| !v.is_null()))
                .cloned(),
            _ => None,
        };
        let data = picked.unwrap_or(payload);

        Self {
            success,
            message,
            data,
            status,
        }
    }

    /// Decode the normalized payload into a typed envelope.
    ///
    /// A failure envelope stays a failure; absent (`null`) data on success
    /// stays `None`; a payload that does not deserialize into `T` becomes a
    /// failure envelope carrying the decode error.
    pub fn into_typed<T: DeserializeOwned>(self) -> ApiResponse<T> {
        if !self.success {
            return ApiResponse {
                success: false,
                message: self.message,
                data: None,
                status: self.status,
            };
        }

        if self.data.is_null() {
            return ApiResponse {
                success: true,
                message: self.message,
                data: None,
                status: self.status,
            };
        }

        match serde_json::from_value::<T>(self.data) {
            Ok(value) => ApiResponse {
                success: true,
                message: self.message,
                data: Some(value),
                status: self.status,
            },
            Err(err) => ApiResponse {
                success: false,
                message: format!("Invalid response payload: {}", err),
                data: None,
                status: self.status,
            },
        }
    }
}

/// Typed result envelope returned by every service-client method.
///
/// Invariant: `data` is only ever `Some` when `success` is true. The
/// envelope is created fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded end to end
    pub success: bool,
    /// Backend-provided message, or a fixed per-operation fallback
    pub message: String,
    /// Decoded payload; `None` on failure or empty response
    pub data: Option<T>,
    /// HTTP status, or 500 when the transport itself failed
    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope around a payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            status: 200,
        }
    }

    /// Build a failure envelope with status 500
    pub fn failure(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, 500)
    }

    /// Build a failure envelope with an explicit status
    pub fn failure_with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            status,
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Consume the envelope and return the payload, if any
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the payload type, preserving the envelope fields
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            status: self.status,
        }
    }

}
