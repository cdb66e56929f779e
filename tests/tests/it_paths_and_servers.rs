//! Integration tests for path template matching and server base-path normalization.

use oasinfer::{
    InferenceError, OpenApi, Server, UpdateConfig, UpdateMode, Updater,
    build::paths::{match_template, path_to_regex},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use testlib::get_json;

#[test]
fn path_to_regex_round_trips_parameter_values() {
    //* Given
    let regex = path_to_regex("/pets/{id}").expect("template should compile");
    let values = [
        "42",
        "abcXYZ09",
        "with-hyphens",
        "v1.2.3",
        "percent%2Fencoded%20value",
        "under_score~tilde",
    ];

    for value in values {
        for suffix in ["", "?sort=asc", "#section", "?a=1&b=2#top"] {
            //* When
            let path = format!("/pets/{value}{suffix}");
            let captured = regex
                .captures(&path)
                .and_then(|captures| captures.get(1))
                .map(|capture| capture.as_str());

            //* Then
            assert_eq!(captured, Some(value), "value captured from {path}");
        }
    }
}

#[test]
fn match_template_binds_placeholder_names() {
    //* When
    let bindings = match_template("/users/{userId}/posts/{postId}", "/users/7/posts/a-b")
        .expect("template should compile");

    //* Then
    assert_eq!(
        bindings,
        Some(vec![
            ("userId".to_string(), "7".to_string()),
            ("postId".to_string(), "a-b".to_string()),
        ])
    );
}

#[test]
fn match_template_rejects_other_shapes() {
    //* Then
    for path in ["/pets", "/pets/", "/pets/1/toys", "/cats/1"] {
        let bindings = match_template("/pets/{id}", path).expect("template should compile");
        assert_eq!(bindings, None, "{path} should not match");
    }
}

#[test]
fn update_strips_declared_server_base_path() {
    //* Given
    let doc = OpenApi {
        servers: Some(vec![Server::new("https://api.example.com/v1")]),
        ..OpenApi::default()
    };
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Gen));

    //* When
    let doc = updater
        .update_openapi(
            &doc,
            &get_json("https://api.example.com/v1/pets", 200, json!([])),
        )
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(templates, vec!["/pets".to_string()]);
    assert_eq!(doc.servers(), &[Server::new("https://api.example.com/v1")][..]);
}

#[test]
fn update_with_unserved_base_path_adds_host_server_once() {
    //* Given
    let doc = OpenApi {
        servers: Some(vec![Server::new("https://api.example.com/v1")]),
        ..OpenApi::default()
    };
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Gen));
    let exchanges = [
        get_json("https://api.example.com/v10/pets", 200, json!([])),
        get_json("https://api.example.com/health", 200, json!({"ok": true})),
    ];

    //* When
    let doc = updater
        .update_all(doc, &exchanges)
        .expect("should update document");

    //* Then
    assert_eq!(
        doc.servers(),
        &[
            Server::new("https://api.example.com/v1"),
            Server::new("https://api.example.com"),
        ][..]
    );
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(
        templates,
        vec!["/v10/pets".to_string(), "/health".to_string()]
    );
}

#[test]
fn update_with_server_at_base_path_root_maps_to_slash() {
    //* Given
    let doc = OpenApi {
        servers: Some(vec![Server::new("https://api.example.com/v1")]),
        ..OpenApi::default()
    };

    //* When
    let doc = oasinfer::update_openapi(
        &doc,
        &get_json("https://api.example.com/v1", 200, json!({"version": 1})),
        UpdateMode::Gen,
    )
    .expect("should update document");

    //* Then
    assert!(doc.paths.contains_key("/"), "root path should be recorded");
}

#[test]
fn update_referenced_response_is_not_supported() {
    //* Given
    let doc: OpenApi = serde_json::from_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "Pets", "version": "1.0"},
        "servers": [{"url": "https://api.example.com"}],
        "paths": {"/pets": {"get": {"responses": {
            "200": {"$ref": "#/components/responses/PetList"}
        }}}},
        "components": {"responses": {"PetList": {"description": "Pets"}}}
    }))
    .expect("should parse document");

    //* When
    let result = oasinfer::update_openapi(
        &doc,
        &get_json("https://api.example.com/pets", 200, json!([])),
        UpdateMode::Gen,
    );

    //* Then
    assert!(
        matches!(
            result,
            Err(InferenceError::ReferenceNotSupported { ref location })
                if location == "response 200"
        ),
        "expected reference error, got {result:?}"
    );
}
