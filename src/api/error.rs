//! Errors returned by the backend client

use thiserror::Error;

use crate::feed::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or body decoding failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status, with the backend's `detail` when present
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The call needs a session token and none is set
    #[error("not signed in")]
    Unauthenticated,
}

impl ApiError {
    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Unauthenticated => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) => "Could not reach the server".to_string(),
            ApiError::Unauthenticated => "Please sign in first".to_string(),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Server { status, message } => FetchError::Server { status, message },
            ApiError::Unauthenticated => FetchError::Server {
                status: 401,
                message: "not signed in".to_string(),
            },
            ApiError::Network(e) => FetchError::Network(e.to_string()),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// The backend reports failures as `{"detail": "..."}`, or for validation
/// errors as `{"detail": [{"msg": "..."}, ...]}`.
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = || match status {
        401 => "Unauthorized".to_string(),
        404 => "Not found".to_string(),
        _ => format!("HTTP {}", status),
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            fallback()
        } else {
            trimmed.to_string()
        };
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                fallback()
            } else {
                msgs.join("; ")
            }
        }
        _ => fallback(),
    }
}
