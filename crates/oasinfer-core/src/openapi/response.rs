//! Response, request body, header and media type objects.

use super::{Schema, map::Map, schema::RefOr};

/// Responses of an operation keyed by status code (`"200"`, `"404"`, ...) or `"default"`.
pub type Responses = Map<String, RefOr<Response>>;

/// Content of a response or request body keyed by media type (e.g. `application/json`).
pub type Content = Map<String, MediaType>;

/// Describes a single response of an operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Response {
    /// A description of the response.
    pub description: String,

    /// Response headers keyed by lower-cased header name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, RefOr<Header>>>,

    /// A map of media types to their schemas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl Response {
    /// Creates a new response without headers or content.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            headers: None,
            content: None,
        }
    }

    /// Sets the headers for the response.
    pub fn headers(mut self, headers: Map<String, RefOr<Header>>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the content (media types) for the response.
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }
}

/// Describes a request body.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct RequestBody {
    /// A description of the request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A map of media types to their schemas.
    pub content: Content,

    /// Whether the request body is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RequestBody {
    /// Creates a new request body with the given content.
    pub fn new(content: Content) -> Self {
        Self {
            description: None,
            content,
            required: None,
        }
    }

    /// Sets whether the request body is mandatory.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Describes a single response header.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Header {
    /// A description of the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the header is always sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// The schema for the header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Header {
    /// Creates a new header with the given value schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            description: None,
            required: None,
            schema: Some(schema),
        }
    }
}

/// A media type and its schema.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct MediaType {
    /// The schema for this media type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    /// Example value for this media type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl MediaType {
    /// Creates a new media type with the given schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            example: None,
        }
    }

    /// Sets the example value.
    pub fn example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }
}
