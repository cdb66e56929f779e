//! Components container for reusable definitions.

use super::{
    Header, Parameter, RequestBody, Response, Schema, extensions::Extensions, map::Map,
    schema::RefOr,
};

/// Reusable component definitions.
///
/// The engine never writes components; they are carried over from the starting document so
/// that `$ref` targets keep resolving. Keywords not modeled here (security schemes,
/// examples, links, ...) are preserved in `extensions`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Components {
    /// Reusable schema definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Map<String, Schema>>,

    /// Reusable response definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Map<String, RefOr<Response>>>,

    /// Reusable parameter definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, RefOr<Parameter>>>,

    /// Reusable request body definitions.
    #[serde(rename = "requestBodies", skip_serializing_if = "Option::is_none")]
    pub request_bodies: Option<Map<String, RefOr<RequestBody>>>,

    /// Reusable header definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, RefOr<Header>>>,

    /// Unmodeled keywords and extension properties.
    #[serde(skip_serializing_if = "Option::is_none", flatten)]
    pub extensions: Option<Extensions>,
}

impl Components {
    /// Creates a new empty components container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schemas.
    pub fn schemas(mut self, schemas: Map<String, Schema>) -> Self {
        self.schemas = Some(schemas);
        self
    }
}
