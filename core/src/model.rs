use crate::error::{ErrorCode, TubegraphError};
use crate::schema::{AttributeKind, AttributeSchema};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One crawled video as emitted by the recommendation scraper.
///
/// Malformed fields never reject the record. `id` and recommendation entries
/// fall back to their JSON text (`undefined` for a missing id); every other
/// field degrades to `None` (or an empty list) when it is missing or carries
/// an unexpected JSON type.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct VideoRecord {
    #[serde(default = "missing_id", deserialize_with = "video_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub views: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub likes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dislikes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pubdate: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mult: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "recommendation_ids")]
    pub recommendations: Vec<String>,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Value of the record field backing the schema attribute `key`.
    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        use crate::schema::{CHANNEL, DISLIKES, DURATION, LIKES, MULT, PUBDATE};

        match key {
            DURATION => self.duration.map(AttributeValue::Float),
            LIKES => self.likes.map(AttributeValue::Float),
            DISLIKES => self.dislikes.map(AttributeValue::Float),
            MULT => self.mult.map(AttributeValue::Float),
            PUBDATE => self.pubdate.clone().map(AttributeValue::Str),
            CHANNEL => self.channel.clone().map(AttributeValue::Str),
            _ => None,
        }
    }
}

const MISSING_ID: &str = "undefined";

fn missing_id() -> String {
    MISSING_ID.to_string()
}

fn video_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(json_text(Value::deserialize(deserializer)?))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn recommendation_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(json_text).collect()),
        _ => Ok(Vec::new()),
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strings as-is, anything else as compact JSON (`null`, `true`, `{"id":"y"}`).
fn json_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Typed attribute value. Serializes untagged so floats stay JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Float(f64),
    Str(String),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Float(_) => AttributeKind::Float,
            AttributeValue::Str(_) => AttributeKind::String,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Str(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("attribute `{0}` is not declared in the schema")]
    UnknownAttribute(String),
    #[error("attribute `{key}` is declared as {expected} but got {actual}")]
    KindMismatch {
        key: String,
        expected: AttributeKind,
        actual: AttributeKind,
    },
    #[error("attribute `{key}` set twice on node `{node}`")]
    DuplicateAttribute { node: String, key: String },
}

impl TubegraphError for SchemaViolation {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::Internal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    attributes: Vec<(String, AttributeValue)>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            id: id.into(),
            label,
            attributes: Vec::new(),
        }
    }

    /// Attach an attribute after checking it against its schema declaration.
    pub fn with_attribute(
        mut self,
        schema: &AttributeSchema,
        key: &str,
        value: AttributeValue,
    ) -> Result<Self, SchemaViolation> {
        check_attribute(schema, key, &value)?;
        if self.attribute(key).is_some() {
            return Err(SchemaViolation::DuplicateAttribute {
                node: self.id,
                key: key.to_string(),
            });
        }
        self.attributes.push((key.to_string(), value));
        Ok(self)
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Attributes in the order they were attached.
    pub fn attributes(&self) -> &[(String, AttributeValue)] {
        &self.attributes
    }
}

pub fn check_attribute(
    schema: &AttributeSchema,
    key: &str,
    value: &AttributeValue,
) -> Result<(), SchemaViolation> {
    let entry = schema
        .get(key)
        .ok_or_else(|| SchemaViolation::UnknownAttribute(key.to_string()))?;
    if entry.kind != value.kind() {
        return Err(SchemaViolation::KindMismatch {
            key: key.to_string(),
            expected: entry.kind,
            actual: value.kind(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// `index` is the position of `target` in the source's recommendation list.
    pub fn new(source: impl Into<String>, target: impl Into<String>, index: usize) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target, index),
            source,
            target,
        }
    }
}

pub fn edge_id(source: &str, target: &str, index: usize) -> String {
    format!("{}-{}-{}", source, target, index)
}
