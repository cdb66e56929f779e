//! Errors raised while merging an exchange into a document.

/// An exchange that could not be merged into the document.
///
/// Every variant is fatal for the exchange that raised it: the engine is deterministic,
/// so retrying the same exchange against the same document fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Only `application/json` and `text/plain` bodies can be inferred.
    #[error("unknown media type key: {0}")]
    UnknownMediaTypeKey(String),

    /// The object to update is a `$ref` into components, which is not resolved.
    #[error("updating a referenced {location} is not supported")]
    ReferenceNotSupported {
        /// What was referenced, e.g. `response 200`.
        location: String,
    },

    /// The request method has no operation slot in a path item.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A path template that cannot be compiled into a matcher.
    #[error("invalid path template {template}")]
    InvalidPathTemplate {
        template: String,
        #[source]
        source: regex::Error,
    },

    /// A body handed to the `application/json` builder does not parse.
    #[error("body is not valid JSON")]
    InvalidJsonBody(#[from] serde_json::Error),
}

/// Result alias for inference operations.
pub type Result<T, E = InferenceError> = std::result::Result<T, E>;
