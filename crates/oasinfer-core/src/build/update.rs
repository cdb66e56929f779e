//! Folding exchanges into an OpenAPI document.

use super::{
    naming::{PlaceholderNames, RandomNames},
    operation::{merge_operation, set_method},
    paths::{PathMatch, PathMatcher, template_params},
};
use crate::{
    config::{UpdateConfig, UpdateMode},
    error::Result,
    exchange::{HttpExchange, HttpRequest},
    openapi::{HttpMethod, OpenApi, Parameter, ParameterIn, PathItem, Paths, RefOr, Server},
};

/// Merges exchanges into documents according to an [`UpdateConfig`].
///
/// An updater holds no document state. Each call maps a document and an exchange to a new
/// document, so a stream of exchanges is processed by feeding every result into the next
/// call, in arrival order.
pub struct Updater {
    config: UpdateConfig,
    names: Box<dyn PlaceholderNames + Send + Sync>,
}

impl Updater {
    /// Creates an updater drawing placeholder names at random.
    pub fn new(config: UpdateConfig) -> Self {
        Self {
            config,
            names: Box::new(RandomNames),
        }
    }

    /// Replaces the source of names for placeholders created when paths are unified.
    pub fn with_name_generator(
        mut self,
        names: impl PlaceholderNames + Send + Sync + 'static,
    ) -> Self {
        self.names = Box::new(names);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Returns a copy of `doc` describing `exchange` as well.
    pub fn update_openapi(&self, doc: &OpenApi, exchange: &HttpExchange) -> Result<OpenApi> {
        let request = &exchange.request;
        let method = request.method.parse::<HttpMethod>()?;
        let mode = self.config.mode;

        let mut servers = doc.servers().to_vec();
        let path = match normalize_path(&servers, request) {
            Some(path) => path.to_string(),
            None => {
                let url = format!("{}://{}", request.protocol, request.host);
                if !servers.iter().any(|server| server.url == url) {
                    tracing::debug!(%url, "adding server");
                    servers.push(Server::new(url));
                }
                request.pathname.clone()
            }
        };
        tracing::trace!(
            %method,
            %path,
            status = exchange.response.status_code,
            "merging exchange"
        );

        let candidate = merge_operation(None, exchange, &self.config)?;
        let matcher = PathMatcher::new(&*self.names, self.config.reconciliation_threshold);
        let found =
            matcher.find_matching_path(&path, &doc.paths, method, &candidate, mode.generalizes())?;

        let (template, path_item, mut paths) = match found {
            Some(PathMatch {
                path_item,
                canonical_template,
                template_to_replace: Some(replaced),
                ..
            }) => {
                tracing::debug!(from = %replaced, to = %canonical_template, "unifying paths");
                let path_item = with_path_params(path_item, &canonical_template);
                let paths = replace_template(&doc.paths, &replaced, &canonical_template);
                (canonical_template, path_item, paths)
            }
            Some(PathMatch {
                path_item,
                canonical_template,
                ..
            }) => (canonical_template, path_item, doc.paths.clone()),
            None => (path, PathItem::new(), doc.paths.clone()),
        };

        let operation = match path_item.operation(method) {
            Some(existing) => merge_operation(Some(existing), exchange, &self.config)?,
            None => candidate,
        };
        paths.insert(template, set_method(path_item, method, operation));

        let mut updated = doc.clone();
        updated.paths = paths;
        updated.servers = (!servers.is_empty()).then_some(servers);
        Ok(updated)
    }

    /// Folds `exchanges` into `doc` in order, stopping at the first failing exchange.
    pub fn update_all<'e>(
        &self,
        doc: OpenApi,
        exchanges: impl IntoIterator<Item = &'e HttpExchange>,
    ) -> Result<OpenApi> {
        exchanges
            .into_iter()
            .try_fold(doc, |doc, exchange| self.update_openapi(&doc, exchange))
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::new(UpdateConfig::default())
    }
}

/// Returns a copy of `doc` describing `exchange` as well, using the default configuration
/// for `mode` and random placeholder names.
pub fn update_openapi(
    doc: &OpenApi,
    exchange: &HttpExchange,
    mode: UpdateMode,
) -> Result<OpenApi> {
    Updater::new(UpdateConfig::new(mode)).update_openapi(doc, exchange)
}

/// The request path relative to the first declared server serving it.
fn normalize_path<'r>(servers: &[Server], request: &'r HttpRequest) -> Option<&'r str> {
    servers.iter().find_map(|server| {
        server
            .url_parts()?
            .strip_base_path(&request.protocol, &request.host, &request.pathname)
    })
}

/// `paths` with `replaced` removed and `canonical` inserted first.
fn replace_template(paths: &Paths, replaced: &str, canonical: &str) -> Paths {
    let mut rewritten = Paths::with_capacity(paths.len());
    if let Some(path_item) = paths.get(replaced) {
        rewritten.insert(canonical.to_string(), path_item.clone());
    }
    for (template, path_item) in paths.iter() {
        if template != replaced && template != canonical {
            rewritten.insert(template.clone(), path_item.clone());
        }
    }
    rewritten
}

/// Prepends a required string parameter for every placeholder of `template` that neither
/// `path_item` nor any of its operations declares yet.
fn with_path_params(mut path_item: PathItem, template: &str) -> PathItem {
    let existing = path_item.parameters.take().unwrap_or_default();
    let declares = |params: &[RefOr<Parameter>], name: &str| {
        params.iter().any(|param| match param {
            RefOr::T(param) => param.in_ == ParameterIn::Path && param.name == name,
            RefOr::Ref(_) => false,
        })
    };
    let declared = |name: &str| {
        declares(&existing, name)
            || path_item
                .operations()
                .filter_map(|(_, operation)| operation.parameters.as_deref())
                .any(|params| declares(params, name))
    };
    let mut parameters: Vec<RefOr<Parameter>> = template_params(template)
        .into_iter()
        .filter(|name| !declared(name))
        .map(|name| RefOr::T(Parameter::new_path(name)))
        .collect();
    parameters.extend(existing);
    path_item.parameters = (!parameters.is_empty()).then_some(parameters);
    path_item
}
