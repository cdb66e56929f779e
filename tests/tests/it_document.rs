//! Integration tests for updating caller-supplied documents.
//!
//! Keywords the engine does not interpret must survive an update untouched.

use oasinfer::{OpenApi, UpdateMode};
use pretty_assertions::assert_eq;
use serde_json::json;
use testlib::get_json;

fn petstore() -> serde_json::Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Petstore", "version": "1.0.0"},
        "servers": [{"url": "https://petstore.example.com/api"}],
        "tags": [{"name": "pets"}],
        "security": [{"apiKey": []}],
        "x-owner": "team-pets",
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "tags": ["pets"],
                    "responses": {
                        "200": {
                            "description": "A list of pets",
                            "content": {"application/json": {"schema": {
                                "type": "array",
                                "items": {"$ref": "#/components/schemas/Pet"}
                            }}}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {"id": {"type": "integer"}}
                }
            },
            "securitySchemes": {"apiKey": {"type": "apiKey", "in": "header", "name": "X-Key"}}
        }
    })
}

#[test]
fn update_keeps_unmodeled_keywords() {
    //* Given
    let doc: OpenApi = serde_json::from_value(petstore()).expect("should parse document");

    //* When
    let doc = oasinfer::update_openapi(
        &doc,
        &get_json("https://petstore.example.com/api/owners", 200, json!({"name": "ann"})),
        UpdateMode::Gen,
    )
    .expect("should update document");

    //* Then
    let doc = serde_json::to_value(&doc).expect("should serialize");
    assert_eq!(doc["openapi"], json!("3.0.3"));
    assert_eq!(doc["x-owner"], json!("team-pets"));
    assert_eq!(doc["tags"], json!([{"name": "pets"}]));
    assert_eq!(doc["security"], json!([{"apiKey": []}]));
    assert_eq!(
        doc["components"]["securitySchemes"],
        petstore()["components"]["securitySchemes"]
    );
    assert_eq!(doc["paths"]["/pets"], petstore()["paths"]["/pets"]);
    assert!(doc["paths"]["/owners"]["get"].is_object());
}

#[test]
fn update_merges_observed_items_into_referenced_schema() {
    //* Given
    let doc: OpenApi = serde_json::from_value(petstore()).expect("should parse document");

    //* When
    let doc = oasinfer::update_openapi(
        &doc,
        &get_json("https://petstore.example.com/api/pets", 200, json!([{"id": 1}])),
        UpdateMode::Gen,
    )
    .expect("should update document");

    //* Then
    let doc = serde_json::to_value(&doc).expect("should serialize");
    let get = &doc["paths"]["/pets"]["get"];
    assert_eq!(get["operationId"], json!("listPets"));
    assert_eq!(
        get["responses"]["200"]["content"]["application/json"]["schema"],
        json!({
            "type": "array",
            "items": {"anyOf": [
                {"$ref": "#/components/schemas/Pet"},
                {"type": "object", "required": ["id"], "properties": {"id": {"type": "integer"}}}
            ]}
        })
    );
}

#[test]
fn deserialize_document_from_yaml_matches_json() {
    //* Given
    let yaml = serde_norway::to_string(&petstore()).expect("should serialize to YAML");

    //* When
    let from_yaml: OpenApi = serde_norway::from_str(&yaml).expect("should parse YAML document");
    let from_json: OpenApi = serde_json::from_value(petstore()).expect("should parse document");

    //* Then
    assert_eq!(from_yaml, from_json);
}
