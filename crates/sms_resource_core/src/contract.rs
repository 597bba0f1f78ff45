use chrono::{DateTime, Utc};
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ResourceError, ValidationError};

pub const MAX_TOPIC_LENGTH: usize = 10;
pub const SMS_PROTOCOL: &str = "sms";

/// Input document of the `out` step.
///
/// Missing keys fall back to empty values so they are reported by
/// [`SmsConfig::validate`] rather than by the JSON parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmsConfig {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    #[serde(rename = "aws_access_key_id", default)]
    pub access_key_id: String,
    #[serde(rename = "aws_secret_access_key", default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Params {
    #[serde(default)]
    pub subscribers: Vec<String>,
    #[serde(default)]
    pub message: String,
}

impl SmsConfig {
    /// Runs the field checks in a fixed order and returns the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source.access_key_id.is_empty() {
            return Err(ValidationError::MissingAccessKeyId);
        }

        if self.source.secret_access_key.is_empty() {
            return Err(ValidationError::MissingSecretAccessKey);
        }

        if self.source.topic.is_empty() {
            return Err(ValidationError::MissingTopic);
        }

        if self.source.topic.len() > MAX_TOPIC_LENGTH {
            return Err(ValidationError::TopicTooLong);
        }

        if self.params.subscribers.is_empty() {
            return Err(ValidationError::MissingSubscribers);
        }

        if self.params.message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }

        Ok(())
    }
}

/// Reads a JSON document that must be an object. A bare `null` reads as an
/// empty object, so absent fields are reported downstream.
fn parse_object(raw: &[u8]) -> Result<Value, serde_json::Error> {
    match serde_json::from_slice(raw)? {
        Value::Null => Ok(Value::Object(Map::new())),
        document @ Value::Object(_) => Ok(document),
        other => Err(serde_json::Error::invalid_type(
            unexpected(&other),
            &"a JSON object",
        )),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

pub fn parse_config(raw: &[u8]) -> Result<SmsConfig, ResourceError> {
    let document = parse_object(raw).map_err(ResourceError::ParseConfig)?;
    serde_json::from_value(document).map_err(ResourceError::ParseConfig)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeVersion {
    #[serde(rename = "Time")]
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutResponse {
    pub version: TimeVersion,
    pub metadata: Vec<MetadataItem>,
}

impl OutResponse {
    pub fn completed_at(time: DateTime<Utc>) -> Self {
        Self {
            version: TimeVersion { time },
            metadata: Vec::new(),
        }
    }
}

/// Input document of the `in` step. A `null` version counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InRequest {
    #[serde(default)]
    pub version: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InResponse {
    pub version: Value,
}

pub fn parse_in_request(raw: &[u8]) -> Result<InResponse, ResourceError> {
    let document = parse_object(raw).map_err(ResourceError::UnmarshalRequest)?;
    let request: InRequest =
        serde_json::from_value(document).map_err(ResourceError::UnmarshalRequest)?;
    let version = request.version.ok_or(ResourceError::MissingVersion)?;
    Ok(InResponse { version })
}

pub fn stable_contract_json(value: impl Serialize) -> Result<String, ResourceError> {
    serde_json::to_string(&value).map_err(ResourceError::MarshalOutput)
}
