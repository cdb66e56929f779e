//! JSON-schema inference from observed JSON values.
//!
//! In generalizing mode the inferred schema is widened just enough to accept both what the
//! existing schema accepted and the new value. In literal mode every observation becomes a
//! constant schema, accumulated as `oneOf` alternatives.

use serde_json::{Number, Value};

use crate::{
    config::UpdateMode,
    openapi::{
        ArraySchema, BooleanSchema, Items, Map, NumberSchema, ObjectSchema, Schema, SchemaKind,
        StringSchema,
    },
};

/// Infers a schema for `value`, merged into `existing` if given.
///
/// With [`UpdateMode::Gen`] the result accepts every instance `existing` accepted and
/// `value`. Otherwise the literal schema of `value` is returned, or prepended to the
/// alternatives of `existing`.
pub fn infer(value: &Value, mode: UpdateMode, existing: Option<&Schema>) -> Schema {
    if mode.generalizes() {
        let observed = generalize(value);
        match existing {
            Some(existing) => merge(existing.clone(), observed),
            None => observed,
        }
    } else {
        let literal = to_const(value);
        match existing {
            Some(existing) => prepend_alternative(literal, existing.clone()),
            None => literal,
        }
    }
}

/// Builds `oneOf[new, ...existing]`, splicing the members of an existing `oneOf` instead
/// of nesting it.
pub fn prepend_alternative(new: Schema, existing: Schema) -> Schema {
    let mut alternatives = vec![new];
    alternatives.extend(existing.into_alternatives());
    Schema::OneOf(alternatives)
}

/// The minimal schema matching the shape of `value`, without literal values.
pub fn generalize(value: &Value) -> Schema {
    match value {
        Value::Object(fields) => Schema::Object(ObjectSchema {
            properties: fields
                .iter()
                .map(|(key, value)| (key.clone(), generalize(value)))
                .collect(),
            required: fields.keys().cloned().collect(),
            additional_properties: None,
        }),
        Value::Array(elements) => Schema::Array(ArraySchema {
            items: elements
                .iter()
                .map(generalize)
                .reduce(merge)
                .map(|items| Items::Single(Box::new(items))),
        }),
        Value::String(_) => Schema::string(),
        Value::Number(number) if is_integral(number) => Schema::integer(),
        Value::Number(_) => Schema::number(),
        Value::Bool(_) => Schema::boolean(),
        Value::Null => Schema::Null,
    }
}

/// The schema accepting exactly `value`.
///
/// Arrays become fixed-length tuples and objects require every observed key.
pub fn to_const(value: &Value) -> Schema {
    match value {
        Value::Object(fields) => Schema::Object(ObjectSchema {
            properties: fields
                .iter()
                .map(|(key, value)| (key.clone(), to_const(value)))
                .collect(),
            required: fields.keys().cloned().collect(),
            additional_properties: None,
        }),
        Value::Array(elements) => {
            Schema::Array(ArraySchema::new().tuple(elements.iter().map(to_const).collect()))
        }
        Value::String(s) => Schema::string_const(s.clone()),
        Value::Number(number) if is_integral(number) => {
            Schema::Integer(NumberSchema::new().enum_values(vec![number.clone()]))
        }
        Value::Number(number) => {
            Schema::Number(NumberSchema::new().enum_values(vec![number.clone()]))
        }
        Value::Bool(b) => Schema::Boolean(BooleanSchema::new().enum_values(vec![*b])),
        Value::Null => Schema::Null,
    }
}

/// Merges two schemas into one accepting the instances of both.
pub fn merge(existing: Schema, observed: Schema) -> Schema {
    match (existing, observed) {
        (Schema::Any, _) | (_, Schema::Any) => Schema::Any,
        (Schema::Object(a), Schema::Object(b)) => Schema::Object(merge_objects(a, b)),
        (Schema::Array(a), Schema::Array(b)) => Schema::Array(merge_arrays(a, b)),
        (Schema::String(a), Schema::String(b)) => Schema::String(StringSchema {
            enum_values: union_enums(a.enum_values, b.enum_values),
        }),
        (Schema::Integer(a), Schema::Integer(b)) => Schema::Integer(merge_numeric(a, b)),
        (Schema::Number(a), Schema::Number(b))
        | (Schema::Number(a), Schema::Integer(b))
        | (Schema::Integer(a), Schema::Number(b)) => Schema::Number(merge_numeric(a, b)),
        (Schema::Boolean(a), Schema::Boolean(b)) => Schema::Boolean(BooleanSchema {
            enum_values: union_enums(a.enum_values, b.enum_values),
        }),
        (Schema::Null, Schema::Null) => Schema::Null,
        (Schema::Ref(a), Schema::Ref(b)) if a == b => Schema::Ref(a),
        (existing, Schema::AnyOf(alternatives)) => alternatives.into_iter().fold(existing, merge),
        (Schema::AnyOf(alternatives), observed) => Schema::AnyOf(absorb(alternatives, observed)),
        (Schema::OneOf(alternatives), observed) => Schema::OneOf(absorb(alternatives, observed)),
        (existing, observed) => Schema::AnyOf(vec![existing, observed]),
    }
}

/// Merges `observed` into the first compatible alternative, or appends it.
fn absorb(mut alternatives: Vec<Schema>, observed: Schema) -> Vec<Schema> {
    match alternatives
        .iter()
        .position(|alternative| mergeable(alternative, &observed))
    {
        Some(idx) => {
            let alternative = alternatives.remove(idx);
            alternatives.insert(idx, merge(alternative, observed));
        }
        None => alternatives.push(observed),
    }
    alternatives
}

fn mergeable(a: &Schema, b: &Schema) -> bool {
    match (a, b) {
        (Schema::Any, _) => true,
        (Schema::Ref(x), Schema::Ref(y)) => x == y,
        (Schema::OneOf(_) | Schema::AnyOf(_) | Schema::AllOf(_), _) => false,
        _ => {
            let numeric =
                |kind: SchemaKind| matches!(kind, SchemaKind::Integer | SchemaKind::Number);
            a.kind() == b.kind() || (numeric(a.kind()) && numeric(b.kind()))
        }
    }
}

fn merge_objects(a: ObjectSchema, b: ObjectSchema) -> ObjectSchema {
    let required = a
        .required
        .into_iter()
        .filter(|name| b.required.contains(name))
        .collect();

    let mut properties = Map::new();
    for (name, schema) in a.properties.iter() {
        let merged = match b.properties.get(name) {
            Some(observed) => merge(schema.clone(), observed.clone()),
            None => schema.clone(),
        };
        properties.insert(name.clone(), merged);
    }
    for (name, schema) in b.properties {
        if !a.properties.contains_key(&name) {
            properties.insert(name, schema);
        }
    }

    let additional_properties = if a.additional_properties == b.additional_properties {
        a.additional_properties
    } else {
        None
    };

    ObjectSchema {
        properties,
        required,
        additional_properties,
    }
}

fn merge_arrays(a: ArraySchema, b: ArraySchema) -> ArraySchema {
    let items = match (a.items.and_then(collapse), b.items.and_then(collapse)) {
        (Some(a), Some(b)) => Some(merge(a, b)),
        (Some(items), None) | (None, Some(items)) => Some(items),
        (None, None) => None,
    };
    ArraySchema {
        items: items.map(|items| Items::Single(Box::new(items))),
    }
}

/// Reduces `items` to a single schema; tuple positions are merged together.
fn collapse(items: Items) -> Option<Schema> {
    match items {
        Items::Single(schema) => Some(*schema),
        Items::Tuple(schemas) => schemas.into_iter().reduce(merge),
    }
}

fn merge_numeric(a: NumberSchema, b: NumberSchema) -> NumberSchema {
    let bound = |x: Option<Number>, y: Option<Number>, keep_lower: bool| match (x, y) {
        (Some(x), Some(y)) => {
            let x_is_lower = x.as_f64() <= y.as_f64();
            Some(if x_is_lower == keep_lower { x } else { y })
        }
        _ => None,
    };
    NumberSchema {
        minimum: bound(a.minimum, b.minimum, true),
        maximum: bound(a.maximum, b.maximum, false),
        enum_values: union_enums(a.enum_values, b.enum_values),
    }
}

/// Keeps an enumeration only if both sides enumerate their values.
fn union_enums<T: PartialEq>(a: Option<Vec<T>>, b: Option<Vec<T>>) -> Option<Vec<T>> {
    let (mut a, b) = (a?, b?);
    for value in b {
        if !a.contains(&value) {
            a.push(value);
        }
    }
    Some(a)
}

fn is_integral(number: &Number) -> bool {
    number.is_i64() || number.is_u64()
}
