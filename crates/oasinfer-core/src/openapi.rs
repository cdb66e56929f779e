//! OpenAPI 3.0 document types.
//!
//! This module provides the value types the inference engine reads and produces. They
//! mirror the OpenAPI 3.0 object layout closely enough to round-trip a caller-supplied
//! document: keywords the engine does not interpret are kept in `extensions` maps.

pub mod components;
pub mod extensions;
pub mod info;
pub mod map;
pub mod parameter;
pub mod path;
pub mod response;
pub mod schema;
pub mod server;

pub use self::{
    components::Components,
    extensions::Extensions,
    info::{Contact, Info, License},
    map::{Map, PathMap},
    parameter::{Parameter, ParameterIn},
    path::{HttpMethod, Operation, PathItem, Paths},
    response::{Content, Header, MediaType, RequestBody, Response, Responses},
    schema::{
        AdditionalProperties, ArraySchema, BooleanSchema, Items, NumberSchema, ObjectSchema,
        Ref, RefOr, Schema, SchemaKind, SchemaType, StringSchema,
    },
    server::{Server, ServerUrl},
};

/// The OpenAPI version written into documents started from scratch.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// The root object of an OpenAPI document.
///
/// Documents are treated as immutable values by the inference engine: every update
/// produces a new document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpenApi {
    /// The OpenAPI specification version of the document.
    pub openapi: String,

    /// Metadata about the API.
    pub info: Info,

    /// Servers hosting the API. Path keys are relative to these URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    /// Path items keyed by path template, in document order.
    pub paths: Paths,

    /// Reusable component definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Unmodeled root keywords (`tags`, `security`, ...) and extension properties.
    #[serde(skip_serializing_if = "Option::is_none", flatten)]
    pub extensions: Option<Extensions>,
}

impl OpenApi {
    /// Creates a new document with the given info and no paths.
    pub fn new(info: Info) -> Self {
        Self::builder().info(info).build()
    }

    /// Starts a document from the `3.0.0` base document.
    pub fn builder() -> OpenApiBuilder {
        OpenApiBuilder::new()
    }

    /// Returns the declared servers, or an empty slice.
    pub fn servers(&self) -> &[Server] {
        self.servers.as_deref().unwrap_or_default()
    }
}

/// The base document: placeholder info and no paths.
impl Default for OpenApi {
    fn default() -> Self {
        OpenApiBuilder::new().build()
    }
}

/// Builder for [`OpenApi`] documents.
#[derive(Debug, Clone)]
pub struct OpenApiBuilder {
    doc: OpenApi,
}

impl OpenApiBuilder {
    /// Creates a builder for an empty `3.0.0` document with placeholder info.
    pub fn new() -> Self {
        Self {
            doc: OpenApi {
                openapi: OPENAPI_VERSION.to_string(),
                info: Info::default(),
                servers: None,
                paths: Paths::new(),
                components: None,
                extensions: None,
            },
        }
    }

    pub fn info(mut self, info: Info) -> Self {
        self.doc.info = info;
        self
    }

    pub fn servers(mut self, servers: Vec<Server>) -> Self {
        self.doc.servers = Some(servers);
        self
    }

    pub fn paths(mut self, paths: Paths) -> Self {
        self.doc.paths = paths;
        self
    }

    pub fn components(mut self, components: Components) -> Self {
        self.doc.components = Some(components);
        self
    }

    /// Sets the unmodeled root keywords.
    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.doc.extensions = Some(extensions);
        self
    }

    pub fn build(self) -> OpenApi {
        self.doc
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<OpenApi> for OpenApiBuilder {
    fn from(doc: OpenApi) -> Self {
        Self { doc }
    }
}
