use std::io::{Read, Write};

use chrono::Utc;
use sms_resource_core::application::run_notification;
use sms_resource_core::contract::{
    parse_config, stable_contract_json, OutResponse, SmsConfig, Source,
};
use sms_resource_core::error::ResourceError;
use sms_resource_core::messaging::MessagingClient;
use tracing::info;

use super::{report_failure, write_stdout, RunStatus};

/// Runs the `out` step: validate the input, build a messaging client from the
/// configured credentials, then notify. `connect` is only invoked once the
/// input is valid.
pub fn handle_out<C, F>(
    stdin: impl Read,
    mut stdout: impl Write,
    mut stderr: impl Write,
    connect: F,
) -> RunStatus
where
    C: MessagingClient,
    F: FnOnce(&Source) -> C,
{
    let result = read_config(stdin).and_then(|config| {
        let client = connect(&config.source);
        notify(&client, &config)
    });

    match result.and_then(|body| write_stdout(&mut stdout, &body)) {
        Ok(()) => RunStatus::Success,
        Err(error) => report_failure(&mut stderr, &error),
    }
}

pub fn read_config(mut stdin: impl Read) -> Result<SmsConfig, ResourceError> {
    let mut raw = Vec::new();
    stdin
        .read_to_end(&mut raw)
        .map_err(ResourceError::ReadStdin)?;
    let config = parse_config(&raw)?;
    config.validate()?;
    Ok(config)
}

fn notify(client: &dyn MessagingClient, config: &SmsConfig) -> Result<String, ResourceError> {
    let summary = run_notification(client, config)?;
    info!(
        topic = %summary.topic,
        existing = summary.existing_subscribers,
        subscribed = summary.subscribed.len(),
        "out step completed"
    );
    stable_contract_json(OutResponse::completed_at(Utc::now()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Mutex;

    use chrono::DateTime;
    use serde_json::Value;
    use sms_resource_core::error::{ProviderError, ProviderStage};
    use sms_resource_core::messaging::TopicId;

    use super::*;

    #[derive(Default)]
    struct FakeClient {
        existing: Vec<String>,
        fail_publish: bool,
        subscribed: Mutex<Vec<Vec<String>>>,
        published: Mutex<Vec<String>>,
    }

    impl MessagingClient for FakeClient {
        fn create_topic(&self, name: &str) -> Result<TopicId, ProviderError> {
            Ok(TopicId::new(format!("arn:aws:sns:us-east-1:000000000000:{name}")))
        }

        fn list_subscribers(&self, _topic: &TopicId) -> Result<Vec<String>, ProviderError> {
            Ok(self.existing.clone())
        }

        fn subscribe(&self, _topic: &TopicId, endpoints: &[String]) -> Result<(), ProviderError> {
            self.subscribed
                .lock()
                .expect("poisoned mutex")
                .push(endpoints.to_vec());
            Ok(())
        }

        fn publish(&self, _topic: &TopicId, message: &str) -> Result<(), ProviderError> {
            if self.fail_publish {
                return Err(ProviderError::new(
                    ProviderStage::Publish,
                    "AuthorizationError: not allowed",
                ));
            }
            self.published
                .lock()
                .expect("poisoned mutex")
                .push(message.to_string());
            Ok(())
        }
    }

    const VALID_INPUT: &str = r#"{
        "source": {
            "aws_access_key_id": "id123",
            "aws_secret_access_key": "key123",
            "topic": "concourse"
        },
        "params": {
            "subscribers": ["s1", "s2"],
            "message": "hello!"
        }
    }"#;

    fn run_with(input: &str, client: &FakeClient) -> (RunStatus, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = handle_out(input.as_bytes(), &mut stdout, &mut stderr, |_| client);
        (
            status,
            String::from_utf8(stdout).expect("utf-8"),
            String::from_utf8(stderr).expect("utf-8"),
        )
    }

    #[test]
    fn reports_completion_time_version() {
        let client = FakeClient {
            existing: vec!["s1".to_string()],
            ..FakeClient::default()
        };

        let (status, stdout, stderr) = run_with(VALID_INPUT, &client);

        assert_eq!(status, RunStatus::Success);
        assert!(stderr.is_empty());
        assert_eq!(
            *client.subscribed.lock().expect("poisoned mutex"),
            vec![vec!["s2".to_string()]]
        );
        assert_eq!(
            *client.published.lock().expect("poisoned mutex"),
            vec!["hello!".to_string()]
        );

        let output: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
        assert_eq!(output["metadata"], Value::Array(Vec::new()));
        let time = output["version"]["Time"]
            .as_str()
            .expect("Time should be a string");
        assert!(time.ends_with('Z'));
        DateTime::parse_from_rfc3339(time).expect("Time should be RFC3339");
    }

    #[test]
    fn rejects_long_topic_without_connecting() {
        let connected = Cell::new(false);
        let client = FakeClient::default();
        let input = VALID_INPUT.replace("\"concourse\"", "\"concourse1234567890\"");
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = handle_out(input.as_bytes(), &mut stdout, &mut stderr, |_| {
            connected.set(true);
            &client
        });

        assert_eq!(status, RunStatus::Failure);
        assert!(!connected.get());
        assert!(stdout.is_empty());
        assert_eq!(
            String::from_utf8(stderr).expect("utf-8"),
            "source.topic from stdin cannot exceed 10 characters\n"
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let client = FakeClient::default();
        let (status, stdout, stderr) = run_with("{\n\tmalformed: \"JSON\"\n}\n", &client);

        assert_eq!(status, RunStatus::Failure);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("error parsing stdin as JSON: key must be a string"));
    }

    #[test]
    fn rejects_array_document_as_parse_error() {
        let client = FakeClient::default();
        let (status, stdout, stderr) = run_with("[]", &client);

        assert_eq!(status, RunStatus::Failure);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("error parsing stdin as JSON: invalid type: sequence"));
        assert!(client.published.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn surfaces_provider_failure_on_stderr_only() {
        let client = FakeClient {
            fail_publish: true,
            ..FakeClient::default()
        };

        let (status, stdout, stderr) = run_with(VALID_INPUT, &client);

        assert_eq!(status, RunStatus::Failure);
        assert!(stdout.is_empty());
        assert_eq!(
            stderr,
            "error publishing message: AuthorizationError: not allowed\n"
        );
    }

    #[test]
    fn connects_with_configured_credentials() {
        let client = FakeClient::default();
        let mut seen = None;
        let mut stdout = Vec::new();

        let status = handle_out(VALID_INPUT.as_bytes(), &mut stdout, Vec::<u8>::new(), |source| {
            seen = Some(source.clone());
            &client
        });

        assert_eq!(status, RunStatus::Success);
        let source = seen.expect("connect should be called");
        assert_eq!(source.access_key_id, "id123");
        assert_eq!(source.secret_access_key, "key123");
    }
}
