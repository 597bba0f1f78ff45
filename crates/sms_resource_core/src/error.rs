use std::fmt;

use thiserror::Error;

/// Field-level violations of the `out` input, reported in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source.aws_access_key_id from stdin is either empty or missing")]
    MissingAccessKeyId,
    #[error("source.aws_secret_access_key from stdin is either empty or missing")]
    MissingSecretAccessKey,
    #[error("source.topic from stdin is either empty or missing")]
    MissingTopic,
    #[error("source.topic from stdin cannot exceed 10 characters")]
    TopicTooLong,
    #[error("params.subscribers from stdin is either empty or missing")]
    MissingSubscribers,
    #[error("params.message from stdin is either empty or missing")]
    MissingMessage,
}

/// The messaging provider call that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStage {
    CreateTopic,
    SetDisplayName,
    ListSubscribers,
    Subscribe { endpoint: String },
    Publish,
}

impl fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTopic => f.write_str("error creating topic"),
            Self::SetDisplayName => f.write_str("error creating SMS display name for topic"),
            Self::ListSubscribers => f.write_str("error getting list of existing subscribers"),
            Self::Subscribe { endpoint } => write!(f, "error subscribing {endpoint}"),
            Self::Publish => f.write_str("error publishing message"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage}: {detail}")]
pub struct ProviderError {
    pub stage: ProviderStage,
    pub detail: String,
}

impl ProviderError {
    pub fn new(stage: ProviderStage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: detail.into(),
        }
    }
}

/// Every way a single resource invocation can fail.
///
/// All variants are terminal: the handler writes the display form to stderr
/// and exits with status 1.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("error reading from stdin: {0}")]
    ReadStdin(std::io::Error),

    #[error("error parsing stdin as JSON: {0}")]
    ParseConfig(serde_json::Error),

    #[error("error unmarshalling JSON: {0}")]
    UnmarshalRequest(serde_json::Error),

    #[error("error: version key pair is missing from stdin")]
    MissingVersion,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("error marshalling output for stdout: {0}")]
    MarshalOutput(serde_json::Error),

    #[error("error writing to stdout: {0}")]
    WriteStdout(std::io::Error),
}
