//! Remote directory API access.
//!
//! The API exposes plain JSON over `GET`. Collections come back either
//! wrapped in an object under a known key (`{"portfolios": [...]}`) or as a
//! bare top-level array; both shapes are accepted here so the rest of the
//! crate only ever sees typed records.

pub mod http;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DirectoryError, Result};

pub use http::HttpClient;

/// A single `GET` against the directory API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRequest {
    /// Path relative to the API base, always starting with `/`
    pub path: String,
    /// Query parameters in send order; empty values are never included
    pub params: Vec<(String, String)>,
}

impl ListRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Set a parameter, skipping it when the trimmed value is empty.
    /// A later value for the same name replaces the earlier one in place.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        match self.params.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.params.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Common interface for anything that can answer directory requests
pub trait RemoteClient: Send + Sync {
    /// Perform a `GET` and return the parsed JSON body
    fn get_json(
        &self,
        request: &ListRequest,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;
}

/// Pull a typed collection out of a response body.
///
/// Accepts `{ "<key>": [...] }` or a bare `[...]`. Anything else, including
/// an object without `key` or with a non-array under it, is malformed.
pub fn extract_collection<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(DirectoryError::MalformedResponse(format!(
                    "expected an array under '{key}', got {}",
                    json_kind(&other)
                )));
            }
            None => {
                return Err(DirectoryError::MalformedResponse(format!(
                    "response object has no '{key}' array"
                )));
            }
        },
        other => {
            return Err(DirectoryError::MalformedResponse(format!(
                "expected an array, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(DirectoryError::from))
        .collect()
}

/// Pull a single typed object out of a response body.
///
/// Prefers the object under `key`. When the key is absent, the body itself is
/// used only if it carries one of `identity_fields`; an envelope such as
/// `{"message": "not found"}` or a `null` under `key` is malformed.
pub fn extract_object<T: DeserializeOwned>(
    body: Value,
    key: &str,
    identity_fields: &[&str],
) -> Result<T> {
    let object = match body {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => inner,
            None if identity_fields
                .iter()
                .any(|field| map.get(*field).is_some_and(|v| !v.is_null())) =>
            {
                Value::Object(map)
            }
            None => {
                return Err(DirectoryError::MalformedResponse(format!(
                    "no object under '{key}' and no record at the top level"
                )));
            }
            Some(other) => {
                return Err(DirectoryError::MalformedResponse(format!(
                    "expected an object under '{key}', got {}",
                    json_kind(&other)
                )));
            }
        },
        other => {
            return Err(DirectoryError::MalformedResponse(format!(
                "expected an object, got {}",
                json_kind(&other)
            )));
        }
    };

    Ok(serde_json::from_value(object)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
