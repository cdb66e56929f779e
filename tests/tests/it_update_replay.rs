//! Integration tests for folding exchanges into a document in literal-preserving modes.
//!
//! Replay mode keeps every observed value as a `oneOf` alternative, newest first, and never
//! rewrites existing paths into templates. Mixed mode behaves the same way.

use oasinfer::{HttpExchange, OpenApi, Parameter, UpdateConfig, UpdateMode, Updater};
use pretty_assertions::assert_eq;
use serde_json::json;
use testlib::{SequenceNames, get_json, request, text_response};

fn query_param<'d>(doc: &'d OpenApi, template: &str, name: &str) -> &'d Parameter {
    doc.paths[template]
        .get
        .as_ref()
        .and_then(|operation| operation.parameters.as_ref())
        .and_then(|params| {
            params
                .iter()
                .filter_map(|param| param.as_inline())
                .find(|param| param.name == name)
        })
        .expect("parameter should be recorded")
}

#[test]
fn update_replay_accumulates_query_values_newest_first() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Replay));
    let exchanges = [
        get_json("https://api.example.com/search?q=cat", 200, json!([])),
        get_json("https://api.example.com/search?q=dog", 200, json!([])),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let param = query_param(&doc, "/search", "q");
    assert!(!param.required, "first observation is never required");
    assert_eq!(
        serde_json::to_value(&param.schema).expect("should serialize"),
        json!({"oneOf": [
            {"type": "string", "enum": ["dog"]},
            {"type": "string", "enum": ["cat"]}
        ]})
    );
}

#[test]
fn update_replay_parameter_stays_optional_once_created_optional() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Replay));
    let exchanges = [
        get_json("https://api.example.com/items?id=1", 200, json!({})),
        get_json("https://api.example.com/items", 200, json!({})),
        get_json("https://api.example.com/items?id=2", 200, json!({})),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let param = query_param(&doc, "/items", "id");
    assert!(!param.required);
    assert_eq!(
        serde_json::to_value(&param.schema).expect("should serialize"),
        json!({"oneOf": [
            {"type": "string", "enum": ["2"]},
            {"type": "string", "enum": ["1"]}
        ]})
    );
}

#[test]
fn update_replay_accumulates_text_bodies() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Replay));
    let exchanges = [
        HttpExchange::new(
            request("GET", "http://localhost:8080/ping"),
            text_response(200, "x"),
        ),
        HttpExchange::new(
            request("GET", "http://localhost:8080/ping"),
            text_response(200, "y"),
        ),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let doc = serde_json::to_value(&doc).expect("should serialize");
    assert_eq!(doc["servers"], json!([{"url": "http://localhost:8080"}]));
    assert_eq!(
        doc["paths"]["/ping"]["get"]["responses"]["200"]["content"],
        json!({"text/plain": {"schema": {"oneOf": [
            {"type": "string", "enum": ["y"]},
            {"type": "string", "enum": ["x"]}
        ]}}})
    );
}

#[test]
fn update_replay_keeps_identical_json_bodies_as_distinct_alternatives() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Replay));
    let exchange = get_json("https://api.example.com/me", 200, json!({"id": 1}));

    //* When
    let doc = updater
        .update_all(OpenApi::default(), [&exchange, &exchange])
        .expect("should update document");

    //* Then
    let doc = serde_json::to_value(&doc).expect("should serialize");
    let literal = json!({
        "type": "object",
        "required": ["id"],
        "properties": {"id": {"type": "integer", "enum": [1]}}
    });
    assert_eq!(
        doc["paths"]["/me"]["get"]["responses"]["200"]["content"]["application/json"]["schema"],
        json!({"oneOf": [literal.clone(), literal]})
    );
}

#[test]
fn update_replay_and_mixed_never_unify_paths() {
    for mode in [UpdateMode::Replay, UpdateMode::Mixed] {
        //* Given
        let updater =
            Updater::new(UpdateConfig::new(mode)).with_name_generator(SequenceNames::new());
        let exchanges = [
            get_json("https://api.example.com/pets/1", 200, json!({"id": 1})),
            get_json("https://api.example.com/pets/2", 200, json!({"id": 2})),
        ];

        //* When
        let doc = updater
            .update_all(OpenApi::default(), &exchanges)
            .expect("should update document");

        //* Then
        let templates: Vec<_> = doc.paths.keys().cloned().collect();
        assert_eq!(
            templates,
            vec!["/pets/1".to_string(), "/pets/2".to_string()],
            "mode {mode} should keep literal paths"
        );
    }
}

#[test]
fn update_replay_matches_existing_templates() {
    //* Given
    let doc: OpenApi = serde_json::from_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "Pets", "version": "2.0"},
        "paths": {"/pets/{petId}": {"parameters": [
            {"name": "petId", "in": "path", "required": true, "schema": {"type": "string"}}
        ]}}
    }))
    .expect("should parse document");
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Replay));

    //* When
    let doc = updater
        .update_openapi(
            &doc,
            &get_json("https://api.example.com/pets/42", 200, json!({"id": 42})),
        )
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(templates, vec!["/pets/{petId}".to_string()]);
    assert!(doc.paths["/pets/{petId}"].get.is_some());
}
