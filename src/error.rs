//! Error handling

use thiserror::Error;

use crate::constants::GENERIC_PREDICT_ERROR;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Prediction service errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side timeout expired
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response, with the body's `error` string when it had one
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body did not match the contract
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Message shown to the user for a failed prediction.
    ///
    /// Only a server-supplied error string is surfaced verbatim; everything
    /// else collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_PREDICT_ERROR.to_string(),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Form input errors.
///
/// Out-of-range numbers are never an error; they are clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown {field} value: {value}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("{field} expects a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} expects {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = ServiceError::Status {
            status: 503,
            message: Some("model unavailable".to_string()),
        };
        assert_eq!(err.user_message(), "model unavailable");
    }

    #[test]
    fn test_everything_else_is_generic() {
        let errors = [
            ServiceError::Network("connection refused".to_string()),
            ServiceError::Timeout,
            ServiceError::Status {
                status: 500,
                message: None,
            },
            ServiceError::Status {
                status: 500,
                message: Some("  ".to_string()),
            },
            ServiceError::Malformed("missing predicted_rent".to_string()),
        ];

        for err in errors {
            assert_eq!(err.user_message(), GENERIC_PREDICT_ERROR, "{err}");
        }
    }

    #[test]
    fn test_display() {
        let err = ServiceError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error 404: <no message>");
    }
}
