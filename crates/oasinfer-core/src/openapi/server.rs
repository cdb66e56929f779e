//! Server object.

use super::map::Map;

/// A server hosting the API. Paths in the document are relative to its URL.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Server {
    /// The URL of the target host, optionally with a base path.
    pub url: String,

    /// A description of the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Variables used for URL template substitution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, serde_json::Value>>,
}

impl Server {
    /// Creates a new server entry for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Splits an absolute server URL into scheme, host and base path.
    ///
    /// Returns `None` for relative or templated URLs. The base path never ends with `/`,
    /// so a server at the host root has an empty base path.
    pub fn url_parts(&self) -> Option<ServerUrl<'_>> {
        if self.url.contains('{') {
            return None;
        }
        let (scheme, rest) = self.url.split_once("://")?;
        let (host, base_path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if scheme.is_empty() || host.is_empty() {
            return None;
        }
        Some(ServerUrl {
            scheme,
            host,
            base_path: base_path.trim_end_matches('/'),
        })
    }
}

/// The components of an absolute server URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerUrl<'a> {
    pub scheme: &'a str,
    pub host: &'a str,
    pub base_path: &'a str,
}

impl ServerUrl<'_> {
    /// Strips this server's base path from `path` if the server serves `scheme://host`
    /// and `path` lies under the base path.
    ///
    /// The prefix must end on a segment boundary: `/v1` serves `/v1/pets` but not `/v10`.
    pub fn strip_base_path<'p>(&self, scheme: &str, host: &str, path: &'p str) -> Option<&'p str> {
        if !self.scheme.eq_ignore_ascii_case(scheme) || !self.host.eq_ignore_ascii_case(host) {
            return None;
        }
        let rest = path.strip_prefix(self.base_path)?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with(['/', '?', '#']) {
            Some(rest)
        } else {
            None
        }
    }
}
