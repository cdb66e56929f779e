//! Shared fixtures for the oasinfer integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use oasinfer::{HttpExchange, HttpRequest, HttpResponse, PlaceholderNames};

/// Builds a request from a method and an absolute URL such as
/// `https://api.example.com/search?q=cat&tag=a&tag=b`.
///
/// Repeated query keys are collected into a multi-valued parameter.
pub fn request(method: &str, url: &str) -> HttpRequest {
    let (protocol, rest) = url.split_once("://").unwrap_or(("http", url));
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, "/"),
    };
    let (pathname, query) = path.split_once('?').unwrap_or((path, ""));

    let mut request = HttpRequest::new(method, protocol, authority, pathname);
    request.path = Some(path.to_string());

    let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        match pairs.iter_mut().find(|(seen, _)| seen == name) {
            Some((_, values)) => values.push(value.to_string()),
            None => pairs.push((name.to_string(), vec![value.to_string()])),
        }
    }
    for (name, mut values) in pairs {
        request = match values.len() {
            1 => request.query(name, values.remove(0)),
            _ => request.query(name, values),
        };
    }
    request
}

/// A response carrying `body` serialized as JSON.
pub fn json_response(status_code: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse::new(status_code)
        .header("content-type", "application/json")
        .body(body.to_string())
}

/// A response carrying a plain text body.
pub fn text_response(status_code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(status_code)
        .header("content-type", "text/plain")
        .body(body)
}

/// A `GET` exchange for `url` answered with a JSON body.
pub fn get_json(url: &str, status_code: u16, body: serde_json::Value) -> HttpExchange {
    HttpExchange::new(request("GET", url), json_response(status_code, body))
}

/// Deterministic placeholder names: `seg0`, `seg1`, ...
#[derive(Debug, Default)]
pub struct SequenceNames {
    next: AtomicUsize,
}

impl SequenceNames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaceholderNames for SequenceNames {
    fn generate_placeholder_name(&self) -> String {
        format!("seg{}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}
