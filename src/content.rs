//! Content items and the text normalizer.
//!
//! A `ContentItem` is owned by the caller. Every field deserializes with a
//! default, so partially filled submissions still classify.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClassifyError;

/// A submitted piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Author or outlet identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tags already attached by the submitter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Decode an untyped JSON payload.
    ///
    /// `null` and non-objects are rejected; missing or mistyped fields inside
    /// an object fall back to their defaults instead of failing.
    pub fn from_value(value: &Value) -> Result<Self, ClassifyError> {
        let obj = match value {
            Value::Object(map) => map,
            Value::Null => return Err(ClassifyError::invalid("item is null")),
            other => {
                return Err(ClassifyError::invalid(format!(
                    "expected an object, got {}",
                    json_kind(other)
                )))
            }
        };

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            title: text("title").unwrap_or_default(),
            description: text("description").unwrap_or_default(),
            body: text("body"),
            source: text("source"),
            url: text("url"),
            tags,
        })
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The single analyzable text blob for one item, plus its lowercased view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    lower: String,
}

impl NormalizedText {
    /// Join title, description and body with single spaces, then trim.
    pub fn from_item(item: &ContentItem) -> Self {
        let body = item.body.as_deref().unwrap_or("");
        let joined = format!("{} {} {}", item.title, item.description, body);
        Self::from_text(joined.trim())
    }

    pub fn from_text(text: &str) -> Self {
        let text = text.to_string();
        let lower = text.to_lowercase();
        Self { text, lower }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercased copy used for keyword scanning.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
