//! Request bodies submitted by HTTP clients.
//!
//! A client posts `{"gremlin": "g.V(x)", "bindings": {"x": 1}}`. This module
//! decodes that body into a [`RequestMessage`] and picks a response media
//! type from the `Accept` header. Transport is out of scope; callers hand in
//! the body text and header value.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Script language assumed when the body names none.
pub const DEFAULT_LANGUAGE: &str = "gremlin-groovy";

/// Media type `*/*` resolves to.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Media type that is always accepted.
pub const TEXT_PLAIN: &str = "text/plain";

static QUALITY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(.*);q=(.*)$").ok());

/// Errors from decoding a request body.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The body is not JSON.
    #[error("body could not be parsed")]
    BodyNotParsed(#[source] serde_json::Error),

    /// The body has no `gremlin` field.
    #[error("no gremlin script supplied")]
    NoScript,

    /// `bindings` is present but not an object.
    #[error("bindings must be a Map")]
    BindingsNotMap,
}

/// A decoded request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMessage {
    /// The traversal text.
    pub gremlin: String,
    /// Client-supplied parameter values.
    pub bindings: Map<String, Value>,
    /// Traversal source alias, if given.
    pub g: Option<String>,
    /// Script language.
    pub language: String,
    /// Client request id, if given.
    pub request_id: Option<String>,
    /// Result batch size, if given.
    pub batch_size: Option<i64>,
}

impl RequestMessage {
    /// Decodes a JSON request body.
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(body).map_err(RequestError::BodyNotParsed)?;

        let gremlin = value
            .get("gremlin")
            .filter(|v| !v.is_null())
            .map(as_text)
            .ok_or(RequestError::NoScript)?;

        let bindings = match value.get("bindings") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(RequestError::BindingsNotMap),
        };

        let language = value
            .get("language")
            .map_or_else(|| DEFAULT_LANGUAGE.to_string(), as_text);

        let message = Self {
            gremlin,
            bindings,
            g: value.get("g").map(as_text),
            language,
            request_id: value.get("requestId").map(as_text),
            batch_size: value.get("batchSize").and_then(Value::as_i64),
        };
        tracing::debug!(
            bindings = message.bindings.len(),
            language = %message.language,
            "decoded request body"
        );
        Ok(message)
    }

    /// Names of the supplied bindings.
    pub fn binding_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Picks the response media type for an `Accept` header.
///
/// Items are `type` or `type;q=<quality>` (quality defaults to 1.0) and are
/// tried from highest to lowest quality. `*/*` means
/// [`DEFAULT_MEDIA_TYPE`]. [`TEXT_PLAIN`] is accepted even when absent from
/// `supported`. Returns `None` when nothing matches.
pub fn negotiate_accept(header: &str, supported: &[&str]) -> Option<String> {
    let mut ranked: Vec<(String, f64)> = header
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match QUALITY.as_ref().and_then(|re| re.captures(item)) {
            Some(caps) => {
                let quality = caps[2].trim().parse::<f64>().unwrap_or(1.0);
                (caps[1].trim().to_string(), quality)
            }
            None => (item.to_string(), 1.0),
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked.into_iter().find_map(|(media_type, _)| {
        let accept = if media_type == "*/*" {
            DEFAULT_MEDIA_TYPE.to_string()
        } else {
            media_type
        };
        (supported.contains(&accept.as_str()) || accept == TEXT_PLAIN).then_some(accept)
    })
}
