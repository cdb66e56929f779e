//! # oasinfer
//!
//! Infer and maintain OpenAPI 3.0 documents from observed HTTP traffic.
//!
//! This crate provides the main API for building documents from recorded exchanges,
//! re-exporting the document model and the inference engine from `oasinfer-core`.
//!
//! ```
//! use oasinfer::{HttpExchange, HttpRequest, HttpResponse, OpenApi, UpdateConfig, Updater};
//!
//! let exchange = HttpExchange::new(
//!     HttpRequest::new("GET", "https", "api.example.com", "/pets").query("limit", "10"),
//!     HttpResponse::new(200).body(r#"[{"id": 1, "name": "rex"}]"#),
//! );
//!
//! let updater = Updater::new(UpdateConfig::default());
//! let doc = updater.update_openapi(&OpenApi::default(), &exchange)?;
//!
//! assert!(doc.paths["/pets"].get.is_some());
//! assert_eq!(doc.servers()[0].url, "https://api.example.com");
//! # Ok::<(), oasinfer::InferenceError>(())
//! ```

// Re-export the engine modules for access to the building blocks
pub use oasinfer_core::{build, config, error, exchange, openapi};
// Re-export all main types at the crate root for convenience
pub use oasinfer_core::{
    Components, Content, Header, HttpExchange, HttpMethod, HttpRequest, HttpResponse,
    InferenceError, Info, MediaType, OpenApi, OpenApiBuilder, Operation, ParamValue, Parameter,
    ParameterIn, PathItem, Paths, PlaceholderNames, RandomNames, Ref, RefOr, RequestBody,
    Response, Responses, Result, Schema, Server, UpdateConfig, UpdateMode, Updater,
    update_openapi,
};
