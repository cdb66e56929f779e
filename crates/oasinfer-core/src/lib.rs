//! # oasinfer-core
//!
//! Core types and inference engine for oasinfer - OpenAPI 3.0 documents inferred from
//! recorded HTTP traffic.
//!
//! Each [`HttpExchange`] is folded into an [`OpenApi`] document: request and response
//! bodies, query parameters and headers become schemas, and concrete request paths that
//! differ in a single segment are unified into path templates.


pub mod build;
pub mod config;
pub mod error;
pub mod exchange;
pub mod openapi;

// Re-export main types at the crate root for convenience
pub use build::{
    naming::{PlaceholderNames, RandomNames},
    update::{Updater, update_openapi},
};
pub use config::{UpdateConfig, UpdateMode};
pub use error::{InferenceError, Result};
pub use exchange::{HttpExchange, HttpRequest, HttpResponse, ParamValue};
pub use openapi::{
    Components, Content, Header, HttpMethod, Info, MediaType, OpenApi, OpenApiBuilder, Operation,
    Parameter, ParameterIn, PathItem, Paths, Ref, RefOr, RequestBody, Response, Responses,
    Schema, Server,
};
