use std::future::Future;

use aws_config::BehaviorVersion;
use aws_sdk_sns::config::{Credentials, Region};
use aws_sdk_sns::error::DisplayErrorContext;
use sms_resource_core::contract::{Source, SMS_PROTOCOL};
use sms_resource_core::error::{ProviderError, ProviderStage};
use sms_resource_core::messaging::{MessagingClient, TopicId};
use tracing::debug;

pub const SNS_REGION: &str = "us-east-1";
const CREDENTIALS_PROVIDER_NAME: &str = "concourse-source";
const DISPLAY_NAME_ATTRIBUTE: &str = "DisplayName";

/// [`MessagingClient`] backed by AWS SNS.
///
/// SDK futures are driven on the surrounding multi-threaded tokio runtime, so
/// the client must be used from inside one.
#[derive(Debug, Clone)]
pub struct SnsMessagingClient {
    sns_client: aws_sdk_sns::Client,
}

impl SnsMessagingClient {
    /// Builds a client from the static credentials in `source`. No ambient
    /// AWS profile or environment credentials are consulted.
    pub async fn connect(source: &Source) -> Self {
        let credentials = Credentials::new(
            source.access_key_id.clone(),
            source.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(SNS_REGION))
            .credentials_provider(credentials)
            .load()
            .await;

        Self::from_client(aws_sdk_sns::Client::new(&aws_config))
    }

    pub fn from_client(sns_client: aws_sdk_sns::Client) -> Self {
        Self { sns_client }
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

impl MessagingClient for SnsMessagingClient {
    fn create_topic(&self, name: &str) -> Result<TopicId, ProviderError> {
        let client = self.sns_client.clone();
        let topic_name = name.to_string();

        block_on(async move {
            let created = client
                .create_topic()
                .name(topic_name.clone())
                .send()
                .await
                .map_err(|error| {
                    ProviderError::new(
                        ProviderStage::CreateTopic,
                        DisplayErrorContext(&error).to_string(),
                    )
                })?;
            let topic_arn = created.topic_arn().ok_or_else(|| {
                ProviderError::new(
                    ProviderStage::CreateTopic,
                    "response did not include a topic ARN",
                )
            })?;
            debug!(topic_arn, "created topic");

            client
                .set_topic_attributes()
                .topic_arn(topic_arn)
                .attribute_name(DISPLAY_NAME_ATTRIBUTE)
                .attribute_value(topic_name)
                .send()
                .await
                .map_err(|error| {
                    ProviderError::new(
                        ProviderStage::SetDisplayName,
                        DisplayErrorContext(&error).to_string(),
                    )
                })?;

            Ok::<_, ProviderError>(TopicId::new(topic_arn))
        })
    }

    fn list_subscribers(&self, topic: &TopicId) -> Result<Vec<String>, ProviderError> {
        let client = self.sns_client.clone();
        let topic_arn = topic.as_str().to_string();

        // SNS pages at 100 subscriptions; only the first page is read.
        block_on(async move {
            client
                .list_subscriptions_by_topic()
                .topic_arn(topic_arn)
                .send()
                .await
                .map(|listed| {
                    listed
                        .subscriptions()
                        .iter()
                        .filter_map(|subscription| subscription.endpoint())
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .map_err(|error| {
                    ProviderError::new(
                        ProviderStage::ListSubscribers,
                        DisplayErrorContext(&error).to_string(),
                    )
                })
        })
    }

    fn subscribe(&self, topic: &TopicId, endpoints: &[String]) -> Result<(), ProviderError> {
        for endpoint in endpoints {
            let client = self.sns_client.clone();
            let topic_arn = topic.as_str().to_string();
            let target = endpoint.clone();

            block_on(async move {
                client
                    .subscribe()
                    .topic_arn(topic_arn)
                    .protocol(SMS_PROTOCOL)
                    .endpoint(target)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| DisplayErrorContext(&error).to_string())
            })
            .map_err(|detail| {
                ProviderError::new(
                    ProviderStage::Subscribe {
                        endpoint: endpoint.clone(),
                    },
                    detail,
                )
            })?;
            debug!(endpoint = %endpoint, "subscribed endpoint");
        }

        Ok(())
    }

    fn publish(&self, topic: &TopicId, message: &str) -> Result<(), ProviderError> {
        let client = self.sns_client.clone();
        let topic_arn = topic.as_str().to_string();
        let body = message.to_string();

        block_on(async move {
            client
                .publish()
                .topic_arn(topic_arn)
                .message(body)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    ProviderError::new(
                        ProviderStage::Publish,
                        DisplayErrorContext(&error).to_string(),
                    )
                })
        })
    }
}
