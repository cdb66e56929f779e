//! Integration tests for folding exchanges into a document in generalizing mode.
//!
//! In this mode schemas are widened to accept every observed value, and concrete paths that
//! differ in a single segment are unified into path templates.

use oasinfer::{HttpExchange, OpenApi, Schema, UpdateConfig, UpdateMode, Updater};
use pretty_assertions::assert_eq;
use serde_json::json;
use testlib::{SequenceNames, get_json, json_response, request};

#[test]
fn update_with_same_exchange_twice_is_stable() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Gen));
    let exchange = HttpExchange::new(
        request("POST", "https://api.example.com/pets?dry_run=true").body(r#"{"name": "rex"}"#),
        json_response(201, json!({"id": 7, "name": "rex", "tags": ["good", "boy"]})),
    );
    let once = updater
        .update_openapi(&OpenApi::default(), &exchange)
        .expect("should update document");

    //* When
    let twice = updater
        .update_openapi(&once, &exchange)
        .expect("should update document");

    //* Then
    assert_eq!(
        serde_json::to_value(&twice).expect("should serialize"),
        serde_json::to_value(&once).expect("should serialize")
    );
}

#[test]
fn update_with_two_sibling_paths_unifies_them() {
    //* Given
    let updater = Updater::default().with_name_generator(SequenceNames::new());
    let exchanges = [
        get_json("https://api.example.com/v1/clients/jane", 200, json!({})),
        get_json("https://api.example.com/v1/clients/john", 200, json!({})),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(templates, vec!["/v1/clients/{seg0}".to_string()]);

    let path_item = &doc.paths["/v1/clients/{seg0}"];
    assert!(path_item.get.is_some(), "get operation should be kept");
    assert_eq!(
        serde_json::to_value(&path_item.parameters).expect("should serialize"),
        json!([{"name": "seg0", "in": "path", "required": true, "schema": {"type": "string"}}])
    );
}

#[test]
fn update_unified_template_matches_later_requests() {
    //* Given
    let updater = Updater::default().with_name_generator(SequenceNames::new());
    let exchanges = [
        get_json("https://api.example.com/pets/1", 200, json!({"id": 1})),
        get_json("https://api.example.com/pets/2", 200, json!({"id": 2})),
        get_json("https://api.example.com/pets/3", 200, json!({"id": 3, "vip": true})),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(templates, vec!["/pets/{seg0}".to_string()]);
    let response = serde_json::to_value(&doc.paths["/pets/{seg0}"].get)
        .expect("should serialize")["responses"]["200"]["content"]["application/json"]["schema"]
        .clone();
    assert_eq!(
        response,
        json!({
            "type": "object",
            "required": ["id"],
            "properties": {"id": {"type": "integer"}, "vip": {"type": "boolean"}}
        })
    );
}

#[test]
fn update_with_dissimilar_responses_keeps_paths_apart() {
    //* Given
    let updater = Updater::default().with_name_generator(SequenceNames::new());
    let exchanges = [
        get_json(
            "https://api.example.com/things/users",
            200,
            json!({"a": 1, "b": 1, "c": 1}),
        ),
        get_json(
            "https://api.example.com/things/orders",
            200,
            json!({"d": 1, "e": 1, "f": 1}),
        ),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(
        templates,
        vec!["/things/users".to_string(), "/things/orders".to_string()]
    );
}

#[test]
fn update_with_higher_threshold_unifies_dissimilar_responses() {
    //* Given
    let config = UpdateConfig::new(UpdateMode::Gen).reconciliation_threshold(6);
    let updater = Updater::new(config).with_name_generator(SequenceNames::new());
    let exchanges = [
        get_json(
            "https://api.example.com/things/users",
            200,
            json!({"a": 1, "b": 1, "c": 1}),
        ),
        get_json(
            "https://api.example.com/things/orders",
            200,
            json!({"d": 1, "e": 1, "f": 1}),
        ),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(templates, vec!["/things/{seg0}".to_string()]);
}

#[test]
fn update_with_empty_path_segments_keeps_paths_apart() {
    //* Given
    let updater = Updater::default().with_name_generator(SequenceNames::new());
    let exchanges = [
        get_json("https://api.example.com/pets/1", 200, json!({"id": 1})),
        get_json("https://api.example.com/pets/", 200, json!([])),
        get_json("https://api.example.com/pets/1/toys", 200, json!([])),
        get_json("https://api.example.com/pets//toys", 200, json!([])),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let templates: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(
        templates,
        vec![
            "/pets/1".to_string(),
            "/pets/".to_string(),
            "/pets/1/toys".to_string(),
            "/pets//toys".to_string(),
        ]
    );
}

#[test]
fn update_with_missing_key_makes_property_optional() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Gen));
    let exchanges = [
        get_json("https://api.example.com/stats", 200, json!({"a": 1, "b": 2})),
        get_json("https://api.example.com/stats", 200, json!({"a": 1})),
    ];

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let operation = doc.paths["/stats"].get.as_ref().expect("get should exist");
    let response = operation.responses["200"]
        .as_inline()
        .expect("response should be inline");
    let schema = response
        .content
        .as_ref()
        .and_then(|content| content.get("application/json"))
        .and_then(|media_type| media_type.schema.clone())
        .expect("schema should be inferred");
    let Schema::Object(object) = schema else {
        panic!("expected object schema, got {schema:?}");
    };
    assert_eq!(object.required, vec!["a".to_string()]);
    assert!(object.properties.contains_key("a"));
    assert!(object.properties.contains_key("b"));
}

#[test]
fn update_inferred_schemas_accept_every_observed_body() {
    //* Given
    let updater = Updater::new(UpdateConfig::new(UpdateMode::Gen));
    let bodies = [
        json!({"id": 1, "name": "rex", "tags": ["a"], "owner": null}),
        json!({"id": 2.5, "tags": [], "owner": {"id": 9}}),
        json!({"id": 3, "name": "fido", "tags": ["b", "c"], "extra": [1, "x"]}),
    ];
    let exchanges: Vec<_> = bodies
        .iter()
        .map(|body| get_json("https://api.example.com/pets", 200, body.clone()))
        .collect();

    //* When
    let doc = updater
        .update_all(OpenApi::default(), &exchanges)
        .expect("should update document");

    //* Then
    let schema = serde_json::to_value(&doc).expect("should serialize")["paths"]["/pets"]["get"]
        ["responses"]["200"]["content"]["application/json"]["schema"]
        .clone();
    let validator = jsonschema::draft4::new(&schema).expect("should compile inferred schema");
    for body in &bodies {
        let errors: Vec<String> = validator
            .iter_errors(body)
            .map(|err| format!("- {}: {}", err.instance_path, err))
            .collect();
        assert!(
            errors.is_empty(),
            "inferred schema rejects {body}:\n{}",
            errors.join("\n")
        );
    }
}

#[test]
fn serialize_updated_document_to_yaml() {
    //* Given
    let exchange = HttpExchange::new(
        request("GET", "https://api.example.com/pets?limit=10"),
        json_response(200, json!({"id": 1})),
    );

    //* When
    let doc = oasinfer::update_openapi(&OpenApi::default(), &exchange, UpdateMode::Gen)
        .expect("should update document");
    let yaml_output = serde_norway::to_string(&doc).expect("should serialize document to YAML");

    //* Then
    insta::assert_snapshot!(yaml_output, @r"
    openapi: 3.0.0
    info:
      title: API title
      description: API description
      version: '1.0'
    servers:
    - url: https://api.example.com
    paths:
      /pets:
        get:
          parameters:
          - name: limit
            in: query
            required: false
            schema:
              type: string
          responses:
            '200':
              description: Response
              content:
                application/json:
                  schema:
                    type: object
                    required:
                    - id
                    properties:
                      id:
                        type: integer
    ");
}
