//! Extension support for the OpenAPI document.
//!
//! Extensions carry vendor-specific properties (`x-something`) the engine passes through
//! untouched, such as the stateful entity annotations read by the mock server.

use super::map::Map;

/// A map of extension properties.
///
/// Extensions are key-value pairs where the key starts with "x-" and the value can be any
/// valid JSON value.
pub type Extensions = Map<String, serde_json::Value>;
