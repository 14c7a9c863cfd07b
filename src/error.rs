use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the cost and metrics API
///
/// The dashboard does not distinguish between these: every variant ends
/// in the same fixed alert for the component that issued the request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status
    #[error("Unexpected status ({status}): {body}")]
    Status { status: StatusCode, body: String },
    /// The body was not the JSON shape we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected status (500 Internal Server Error): boom"
        );
        assert_eq!(error.kind(), "status");
        assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ApiError = err.into();
        assert_eq!(error.kind(), "decode");
        assert!(error.to_string().starts_with("Invalid response body"));
        assert!(error.status().is_none());
    }
}
