use tracing::{debug, info};

use crate::contract::SmsConfig;
use crate::error::ProviderError;
use crate::messaging::{MessagingClient, TopicId};
use crate::reconcile::compute_new_subscribers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub topic: TopicId,
    pub existing_subscribers: usize,
    pub subscribed: Vec<String>,
}

/// Ensures the topic, subscribes configured endpoints that are missing and
/// publishes the message. The first failing call aborts the run and its
/// error is returned unchanged.
pub fn run_notification(
    client: &dyn MessagingClient,
    config: &SmsConfig,
) -> Result<RunSummary, ProviderError> {
    let topic = client.create_topic(&config.source.topic)?;
    debug!(topic = %topic, "topic ready");

    let existing = client.list_subscribers(&topic)?;
    let new_subscribers = compute_new_subscribers(&existing, &config.params.subscribers);
    debug!(
        existing = existing.len(),
        new = new_subscribers.len(),
        "reconciled subscribers"
    );

    if !new_subscribers.is_empty() {
        client.subscribe(&topic, &new_subscribers)?;
    }

    client.publish(&topic, &config.params.message)?;
    info!(
        topic = %topic,
        subscribed = new_subscribers.len(),
        "published notification"
    );

    Ok(RunSummary {
        topic,
        existing_subscribers: existing.len(),
        subscribed: new_subscribers,
    })
}
