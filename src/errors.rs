use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext, SdkError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Failed to parse event: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to serialize data: {0}")]
    SerializationError(String),
}

impl TaskError {
    /// HTTP status a proxy response should carry for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            TaskError::ValidationError(_) | TaskError::ParseError(_) => 400,
            _ => 500,
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

// Every service crate re-exports the same smithy SdkError, so this covers
// DynamoDB, S3 and Cognito alike.
impl<E, R> From<SdkError<E, R>> for TaskError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(error: SdkError<E, R>) -> Self {
        TaskError::AwsError(DisplayErrorContext(&error).to_string())
    }
}

impl From<BuildError> for TaskError {
    fn from(error: BuildError) -> Self {
        TaskError::AwsError(format!("invalid request: {error}"))
    }
}

impl From<reqwest::Error> for TaskError {
    fn from(error: reqwest::Error) -> Self {
        TaskError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for TaskError {
    fn from(error: serde_json::Error) -> Self {
        TaskError::SerializationError(error.to_string())
    }
}

impl From<base64::DecodeError> for TaskError {
    fn from(error: base64::DecodeError) -> Self {
        TaskError::ParseError(format!("body is not valid base64: {error}"))
    }
}
