use reqwest::StatusCode;

/// Failure of a single Slack Web API call.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("request failed with status {0}")]
    Status(StatusCode),

    #[error("request failed with error {0}")]
    Api(String),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("token cannot be sent as an HTTP header")]
    InvalidToken,
}

impl SlackError {
    /// Short machine-readable code, as Slack would report it in its `error` field.
    pub fn code(&self) -> &str {
        match self {
            SlackError::Status(status) if *status == StatusCode::TOO_MANY_REQUESTS => "ratelimited",
            SlackError::Status(_) => "http_status",
            SlackError::Api(code) => code,
            SlackError::Http(_) => "transport",
            SlackError::Decode(_) => "invalid_response",
            SlackError::InvalidToken => "invalid_token",
        }
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(err: serde_json::Error) -> Self {
        SlackError::Decode(err.to_string())
    }
}
