//! Parameter object for path, query, header and cookie parameters.

use super::{Schema, extensions::Extensions};

/// Describes a single operation parameter.
///
/// A parameter is identified by the combination of its `name` and location (`in`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    /// The name of the parameter. Header names are stored lower-cased.
    pub name: String,

    /// The location of the parameter.
    #[serde(rename = "in")]
    pub in_: ParameterIn,

    /// A description of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the parameter is mandatory. Always `true` for path parameters.
    #[serde(default)]
    pub required: bool,

    /// The schema for the parameter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    /// Extension properties.
    #[serde(skip_serializing_if = "Option::is_none", flatten)]
    pub extensions: Option<Extensions>,
}

impl Parameter {
    /// Creates a new optional parameter with the given name and location.
    pub fn new(name: impl Into<String>, in_: ParameterIn) -> Self {
        Self {
            name: name.into(),
            in_,
            description: None,
            required: false,
            schema: None,
            extensions: None,
        }
    }

    /// Creates a required string path parameter, as synthesized for a path placeholder.
    pub fn new_path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterIn::Path)
            .required(true)
            .schema(Schema::string())
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether the parameter is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets the extensions.
    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

/// The location of the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Part of the path template, e.g. `/pets/{id}`.
    Path,
    /// Appended to the URL after `?`.
    Query,
    /// A request header.
    Header,
    /// A cookie value.
    Cookie,
}

impl ParameterIn {
    /// The keyword used for this location in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterIn::Path => "path",
            ParameterIn::Query => "query",
            ParameterIn::Header => "header",
            ParameterIn::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
