//! Observed HTTP traffic, as produced by the recording proxy or a traffic source.

use serde_json::Value;

use crate::openapi::Map;

/// One HTTP request paired with its response.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HttpExchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

impl HttpExchange {
    pub fn new(request: HttpRequest, response: HttpResponse) -> Self {
        Self { request, response }
    }
}

/// A query parameter or header value: a single string or every repeated occurrence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// The value as JSON. A list with exactly one element is unwrapped to a scalar.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Single(value) => Value::String(value.clone()),
            ParamValue::Multi(values) => match values.as_slice() {
                [value] => Value::String(value.clone()),
                values => Value::Array(values.iter().cloned().map(Value::String).collect()),
            },
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

/// The request half of an exchange.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// The request method, e.g. `GET`.
    pub method: String,

    /// The `Host` the request was sent to, including any port.
    pub host: String,

    /// The URL path without query string or fragment.
    pub pathname: String,

    /// The URL path including the query string, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// The URL scheme, `http` or `https`.
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Query parameters by name.
    #[serde(default)]
    pub query: Map<String, ParamValue>,

    /// Request headers by name.
    #[serde(default)]
    pub headers: Map<String, ParamValue>,

    /// The request body as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_protocol() -> String {
    "http".to_string()
}

impl HttpRequest {
    /// Creates a request without query, headers or body.
    pub fn new(
        method: impl Into<String>,
        protocol: impl Into<String>,
        host: impl Into<String>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            host: host.into(),
            pathname: pathname.into(),
            path: None,
            protocol: protocol.into(),
            query: Map::new(),
            headers: Map::new(),
            body: None,
        }
    }

    /// Adds a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// The response half of an exchange.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status_code: u16,

    /// Response headers by name.
    #[serde(default)]
    pub headers: Map<String, ParamValue>,

    /// The response body as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpResponse {
    /// Creates a response with the given status and no body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Map::new(),
            body: None,
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
