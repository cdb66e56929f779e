//! Matching request paths against path templates, and unifying literal paths into
//! templates.

use regex::Regex;

use super::{diff::diff, naming::PlaceholderNames};
use crate::{
    error::{InferenceError, Result},
    openapi::{HttpMethod, Operation, PathItem, Paths},
};

/// Pattern matched by one path parameter value.
const PARAM_VALUE_PATTERN: &str = "([^/#?]+)";

/// Pattern matched by an optional trailing query string or fragment.
const QUERY_OR_FRAGMENT_PATTERN: &str = "(?:[?#].*)?";

/// A path template found for a request path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    /// The path item currently stored under the matched template.
    pub path_item: PathItem,

    /// Placeholder names of `canonical_template` with the text they captured.
    pub param_bindings: Vec<(String, String)>,

    /// The template the request belongs to.
    pub canonical_template: String,

    /// The existing template to be replaced by `canonical_template`, when the match
    /// unified two paths.
    pub template_to_replace: Option<String>,
}

/// Compiles a path template into an anchored regex with one capture group per placeholder.
///
/// Literal text is matched verbatim. A placeholder matches one non-empty segment. A
/// trailing query string or fragment is accepted.
pub fn path_to_regex(template: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    let rest = split_placeholders(template, |literal, _| {
        pattern.push_str(&regex::escape(literal));
        pattern.push_str(PARAM_VALUE_PATTERN);
    });
    pattern.push_str(&regex::escape(rest));
    pattern.push_str(QUERY_OR_FRAGMENT_PATTERN);
    pattern.push('$');

    Regex::new(&pattern).map_err(|source| InferenceError::InvalidPathTemplate {
        template: template.to_string(),
        source,
    })
}

/// The placeholder names of `template`, in order.
pub fn template_params(template: &str) -> Vec<String> {
    let mut params = Vec::new();
    split_placeholders(template, |_, name| params.push(name.to_string()));
    params
}

/// Calls `visit` with the literal text preceding each `{name}` placeholder and the name,
/// then returns the literal text after the last placeholder.
fn split_placeholders<'t>(
    template: &'t str,
    mut visit: impl FnMut(&'t str, &'t str),
) -> &'t str {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        visit(&rest[..start], &rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    rest
}

/// Matches `path` against `template`, returning the placeholder bindings.
pub fn match_template(template: &str, path: &str) -> Result<Option<Vec<(String, String)>>> {
    let regex = path_to_regex(template)?;
    let Some(captures) = regex.captures(path) else {
        return Ok(None);
    };
    let bindings = template_params(template)
        .into_iter()
        .zip(captures.iter().skip(1))
        .filter_map(|(name, value)| value.map(|value| (name, value.as_str().to_string())))
        .collect();
    Ok(Some(bindings))
}

/// Finds the first template of `paths`, in document order, that matches `request_path`.
pub fn find_exact(request_path: &str, paths: &Paths) -> Result<Option<PathMatch>> {
    for (template, path_item) in paths.iter() {
        if let Some(param_bindings) = match_template(template, request_path)? {
            return Ok(Some(PathMatch {
                path_item: path_item.clone(),
                param_bindings,
                canonical_template: template.clone(),
                template_to_replace: None,
            }));
        }
    }
    Ok(None)
}

/// Finds the template a request path belongs to, unifying paths when allowed.
pub struct PathMatcher<'a> {
    names: &'a dyn PlaceholderNames,
    reconciliation_threshold: usize,
}

impl<'a> PathMatcher<'a> {
    /// Creates a matcher drawing new placeholder names from `names`.
    pub fn new(names: &'a dyn PlaceholderNames, reconciliation_threshold: usize) -> Self {
        Self {
            names,
            reconciliation_threshold,
        }
    }

    /// Finds the template of `request_path`.
    ///
    /// An existing template matching the path wins. Otherwise, if `unify` is set, the first
    /// template that differs from the path in non-adjacent segments only, and whose
    /// responses for `method` are close enough to those of `candidate`, is proposed for
    /// replacement by a template covering both.
    pub fn find_matching_path(
        &self,
        request_path: &str,
        paths: &Paths,
        method: HttpMethod,
        candidate: &Operation,
        unify: bool,
    ) -> Result<Option<PathMatch>> {
        if let Some(found) = find_exact(request_path, paths)? {
            return Ok(Some(found));
        }
        if !unify {
            return Ok(None);
        }

        let request_segments: Vec<&str> = request_path.split('/').collect();
        for (template, path_item) in paths.iter() {
            let template_segments: Vec<&str> = template.split('/').collect();
            if !unifiable(&template_segments, &request_segments) {
                continue;
            }
            if !self.reconcilable(path_item, method, candidate) {
                tracing::trace!(
                    %template,
                    path = request_path,
                    "responses too different to unify"
                );
                continue;
            }

            let canonical_template = self.combine(&template_segments, &request_segments);
            let Some(param_bindings) = match_template(&canonical_template, request_path)? else {
                panic!("unified template {canonical_template} does not match {request_path}");
            };
            return Ok(Some(PathMatch {
                path_item: path_item.clone(),
                param_bindings,
                canonical_template,
                template_to_replace: Some(template.clone()),
            }));
        }
        Ok(None)
    }

    /// Whether the responses both operations declare for the same status codes are
    /// structurally close.
    fn reconcilable(
        &self,
        incumbent: &PathItem,
        method: HttpMethod,
        candidate: &Operation,
    ) -> bool {
        let Some(incumbent) = incumbent.operation(method) else {
            return true;
        };
        for (status, response) in candidate.responses.iter() {
            let Some(existing) = incumbent.responses.get(status) else {
                continue;
            };
            let (Some(response), Some(existing)) = (response.as_inline(), existing.as_inline())
            else {
                continue;
            };
            let (Some(content), Some(existing_content)) = (&response.content, &existing.content)
            else {
                continue;
            };
            if content.len() != 1 || existing_content.len() != 1 {
                continue;
            }
            let (Some((key, media_type)), Some((existing_key, existing_media_type))) =
                (content.iter().next(), existing_content.iter().next())
            else {
                continue;
            };
            if key != existing_key {
                continue;
            }
            let (Some(schema), Some(existing_schema)) =
                (&media_type.schema, &existing_media_type.schema)
            else {
                continue;
            };

            let differences = diff(existing_schema, schema, &[]).total();
            if differences > self.reconciliation_threshold {
                return false;
            }
        }
        true
    }

    /// The template covering both the incumbent template and the request path.
    fn combine(&self, template: &[&str], request: &[&str]) -> String {
        template
            .iter()
            .zip(request)
            .map(|(existing, observed)| {
                if existing == observed || placeholder_name(existing).is_some() {
                    existing.to_string()
                } else if placeholder_name(observed).is_some() {
                    observed.to_string()
                } else {
                    format!("{{{}}}", self.names.generate_placeholder_name())
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Whether two split paths may be unified: same length, same first segment, and at least
/// one but never two adjacent differing segments.
///
/// Every differing segment becomes a placeholder, so both sides must hold a value a
/// placeholder can match.
fn unifiable(template: &[&str], request: &[&str]) -> bool {
    if template.len() != request.len() || template.get(1) != request.get(1) {
        return false;
    }
    let mut differing = Vec::new();
    for (idx, (existing, observed)) in template.iter().zip(request).enumerate() {
        if existing == observed {
            continue;
        }
        if !fits_placeholder(existing) || !fits_placeholder(observed) {
            return false;
        }
        differing.push(idx);
    }
    !differing.is_empty() && differing.windows(2).all(|pair| pair[1] - pair[0] > 1)
}

/// Whether `segment` can be captured by [`PARAM_VALUE_PATTERN`].
fn fits_placeholder(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '#', '?'])
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
