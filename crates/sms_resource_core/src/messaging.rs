use std::fmt;

use crate::error::ProviderError;

/// Provider-assigned identifier of a topic (an ARN for SNS).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capabilities the notification run needs from a pub/sub provider.
///
/// Calls are blocking and are never retried by the caller.
pub trait MessagingClient {
    /// Ensures a topic with `name` exists and returns its identifier.
    fn create_topic(&self, name: &str) -> Result<TopicId, ProviderError>;

    /// Endpoints currently subscribed to `topic`. Only the first page the
    /// provider returns is read.
    fn list_subscribers(&self, topic: &TopicId) -> Result<Vec<String>, ProviderError>;

    /// Subscribes each endpoint over SMS, stopping at the first failure.
    fn subscribe(&self, topic: &TopicId, endpoints: &[String]) -> Result<(), ProviderError>;

    fn publish(&self, topic: &TopicId, message: &str) -> Result<(), ProviderError>;
}

impl<T: MessagingClient + ?Sized> MessagingClient for &T {
    fn create_topic(&self, name: &str) -> Result<TopicId, ProviderError> {
        (**self).create_topic(name)
    }

    fn list_subscribers(&self, topic: &TopicId) -> Result<Vec<String>, ProviderError> {
        (**self).list_subscribers(topic)
    }

    fn subscribe(&self, topic: &TopicId, endpoints: &[String]) -> Result<(), ProviderError> {
        (**self).subscribe(topic, endpoints)
    }

    fn publish(&self, topic: &TopicId, message: &str) -> Result<(), ProviderError> {
        (**self).publish(topic, message)
    }
}
