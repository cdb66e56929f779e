//! Schema types.
//!
//! [`Schema`] is a closed sum type: every node carries exactly one shape. On the wire it
//! uses the regular OpenAPI 3.0 schema object layout (`type`, `properties`, `items`,
//! `enum`, `oneOf`, `$ref`, ...) through the private [`RawSchema`] representation.

use serde_json::{Number, Value};

use super::map::Map;

/// A definition or a reference to a component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a component.
    Ref(Ref),
    /// An inline definition.
    T(T),
}

impl<T> RefOr<T> {
    /// Creates a new reference to a component.
    pub fn new_ref(ref_path: impl Into<String>) -> Self {
        RefOr::Ref(Ref::new(ref_path))
    }

    /// Creates a new inline definition.
    pub fn new_inline(value: T) -> Self {
        RefOr::T(value)
    }

    /// Returns the inline definition, if this is not a reference.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            RefOr::T(value) => Some(value),
            RefOr::Ref(_) => None,
        }
    }
}

/// A reference to a component.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ref {
    /// The reference path to the component (e.g., "#/components/schemas/Pet").
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Ref {
    /// Creates a new reference.
    pub fn new(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: ref_path.into(),
        }
    }
}

/// A schema definition.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "RawSchema", try_from = "RawSchema")]
pub enum Schema {
    /// An object with named properties.
    Object(ObjectSchema),
    /// An array, either homogeneous or a fixed-length tuple.
    Array(ArraySchema),
    /// A string, optionally restricted to literal values.
    String(StringSchema),
    /// A floating point number.
    Number(NumberSchema),
    /// An integral number.
    Integer(NumberSchema),
    /// A boolean, optionally restricted to literal values.
    Boolean(BooleanSchema),
    /// The `null` value.
    Null,
    /// Exactly one of the alternatives.
    OneOf(Vec<Schema>),
    /// At least one of the alternatives.
    AnyOf(Vec<Schema>),
    /// All of the alternatives.
    AllOf(Vec<Schema>),
    /// A reference to a schema component.
    Ref(Ref),
    /// The empty schema, accepting any value.
    Any,
}

/// The shape tag of a [`Schema`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// [`Schema::Object`].
    Object,
    /// [`Schema::Array`].
    Array,
    /// [`Schema::String`].
    String,
    /// [`Schema::Number`].
    Number,
    /// [`Schema::Integer`].
    Integer,
    /// [`Schema::Boolean`].
    Boolean,
    /// [`Schema::Null`].
    Null,
    /// [`Schema::OneOf`], whatever its alternatives.
    OneOf,
    /// [`Schema::AnyOf`], whatever its alternatives.
    AnyOf,
    /// [`Schema::AllOf`], whatever its alternatives.
    AllOf,
    /// [`Schema::Ref`], whatever its target.
    Ref,
    /// [`Schema::Any`].
    Any,
}

impl Schema {
    /// Creates an unconstrained string schema.
    pub fn string() -> Self {
        Schema::String(StringSchema::default())
    }

    /// Creates a string schema accepting only the given literal.
    pub fn string_const(value: impl Into<String>) -> Self {
        Schema::String(StringSchema::new().enum_values(vec![value.into()]))
    }

    /// Creates an unconstrained integer schema.
    pub fn integer() -> Self {
        Schema::Integer(NumberSchema::default())
    }

    /// Creates an unconstrained number schema.
    pub fn number() -> Self {
        Schema::Number(NumberSchema::default())
    }

    /// Creates an unconstrained boolean schema.
    pub fn boolean() -> Self {
        Schema::Boolean(BooleanSchema::default())
    }

    /// Creates a reference to a schema component.
    pub fn new_ref(ref_path: impl Into<String>) -> Self {
        Schema::Ref(Ref::new(ref_path))
    }

    /// Returns the shape tag of this node.
    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::Object(_) => SchemaKind::Object,
            Schema::Array(_) => SchemaKind::Array,
            Schema::String(_) => SchemaKind::String,
            Schema::Number(_) => SchemaKind::Number,
            Schema::Integer(_) => SchemaKind::Integer,
            Schema::Boolean(_) => SchemaKind::Boolean,
            Schema::Null => SchemaKind::Null,
            Schema::OneOf(_) => SchemaKind::OneOf,
            Schema::AnyOf(_) => SchemaKind::AnyOf,
            Schema::AllOf(_) => SchemaKind::AllOf,
            Schema::Ref(_) => SchemaKind::Ref,
            Schema::Any => SchemaKind::Any,
        }
    }

    /// Returns the alternatives of a `oneOf` node, or this node as the only alternative.
    ///
    /// Used to splice alternatives into a new `oneOf` list without nesting.
    pub fn into_alternatives(self) -> Vec<Schema> {
        match self {
            Schema::OneOf(alternatives) => alternatives,
            other => vec![other],
        }
    }
}

/// An object schema definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Property schemas keyed by property name.
    pub properties: Map<String, Schema>,

    /// Names of the properties that must be present, in insertion order.
    pub required: Vec<String>,

    /// Whether (or how) properties beyond `properties` are allowed.
    pub additional_properties: Option<AdditionalProperties>,
}

impl ObjectSchema {
    /// Creates a new empty object schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property schema.
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Sets the required property names.
    pub fn required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    /// Sets the additional properties policy.
    pub fn additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = Some(additional);
        self
    }
}

/// The `additionalProperties` keyword value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// Allow or forbid any additional property.
    Bool(bool),
    /// Additional properties must match the schema.
    Schema(Box<Schema>),
}

/// An array schema definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    /// The schema for array items. `None` accepts any item.
    pub items: Option<Items>,
}

impl ArraySchema {
    /// Creates a new array schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single schema for every item.
    pub fn items(mut self, items: Schema) -> Self {
        self.items = Some(Items::Single(Box::new(items)));
        self
    }

    /// Sets a positional schema per item.
    pub fn tuple(mut self, items: Vec<Schema>) -> Self {
        self.items = Some(Items::Tuple(items));
        self
    }
}

/// The `items` keyword value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Fixed-length tuple of positional schemas.
    Tuple(Vec<Schema>),
    /// A schema every item must satisfy.
    Single(Box<Schema>),
}

/// A string schema definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringSchema {
    /// Possible literal values.
    pub enum_values: Option<Vec<String>>,
}

impl StringSchema {
    /// Creates a new unconstrained string schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enum values.
    pub fn enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// A numeric (`number` or `integer`) schema definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberSchema {
    /// Inclusive lower bound.
    pub minimum: Option<Number>,

    /// Inclusive upper bound.
    pub maximum: Option<Number>,

    /// Possible literal values.
    pub enum_values: Option<Vec<Number>>,
}

impl NumberSchema {
    /// Creates a new unconstrained numeric schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum value.
    pub fn minimum(mut self, minimum: Number) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the maximum value.
    pub fn maximum(mut self, maximum: Number) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the enum values.
    pub fn enum_values(mut self, values: Vec<Number>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// A boolean schema definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BooleanSchema {
    /// Possible literal values.
    pub enum_values: Option<Vec<bool>>,
}

impl BooleanSchema {
    /// Creates a new unconstrained boolean schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enum values.
    pub fn enum_values(mut self, values: Vec<bool>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// Schema type enumeration, the value of the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Integer type.
    Integer,
    /// Number type (floating point).
    Number,
    /// Boolean type.
    Boolean,
    /// Array type.
    Array,
    /// Object type.
    Object,
    /// Null type.
    Null,
}

/// Wire representation of a [`Schema`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RawSchema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    ref_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Map<String, Schema>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    additional_properties: Option<AdditionalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Items>,

    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<Number>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<Value>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    one_of: Option<Vec<Schema>>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    any_of: Option<Vec<Schema>>,

    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    all_of: Option<Vec<Schema>>,
}

impl RawSchema {
    fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    fn numeric(schema_type: SchemaType, numeric: NumberSchema) -> Self {
        Self {
            minimum: numeric.minimum,
            maximum: numeric.maximum,
            enum_values: numeric
                .enum_values
                .map(|values| values.into_iter().map(Value::Number).collect()),
            ..Self::typed(schema_type)
        }
    }
}

impl From<Schema> for RawSchema {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::Object(object) => RawSchema {
                required: (!object.required.is_empty()).then_some(object.required),
                properties: (!object.properties.is_empty()).then_some(object.properties),
                additional_properties: object.additional_properties,
                ..RawSchema::typed(SchemaType::Object)
            },
            Schema::Array(array) => RawSchema {
                items: array.items,
                ..RawSchema::typed(SchemaType::Array)
            },
            Schema::String(string) => RawSchema {
                enum_values: string
                    .enum_values
                    .map(|values| values.into_iter().map(Value::String).collect()),
                ..RawSchema::typed(SchemaType::String)
            },
            Schema::Number(number) => RawSchema::numeric(SchemaType::Number, number),
            Schema::Integer(integer) => RawSchema::numeric(SchemaType::Integer, integer),
            Schema::Boolean(boolean) => RawSchema {
                enum_values: boolean
                    .enum_values
                    .map(|values| values.into_iter().map(Value::Bool).collect()),
                ..RawSchema::typed(SchemaType::Boolean)
            },
            Schema::Null => RawSchema::typed(SchemaType::Null),
            Schema::OneOf(alternatives) => RawSchema {
                one_of: Some(alternatives),
                ..RawSchema::default()
            },
            Schema::AnyOf(alternatives) => RawSchema {
                any_of: Some(alternatives),
                ..RawSchema::default()
            },
            Schema::AllOf(alternatives) => RawSchema {
                all_of: Some(alternatives),
                ..RawSchema::default()
            },
            Schema::Ref(reference) => RawSchema {
                ref_path: Some(reference.ref_path),
                ..RawSchema::default()
            },
            Schema::Any => RawSchema::default(),
        }
    }
}

impl TryFrom<RawSchema> for Schema {
    type Error = String;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        if let Some(ref_path) = raw.ref_path {
            return Ok(Schema::Ref(Ref { ref_path }));
        }
        if let Some(alternatives) = raw.one_of {
            return Ok(Schema::OneOf(alternatives));
        }
        if let Some(alternatives) = raw.any_of {
            return Ok(Schema::AnyOf(alternatives));
        }
        if let Some(alternatives) = raw.all_of {
            return Ok(Schema::AllOf(alternatives));
        }

        let schema_type = match raw.schema_type {
            Some(schema_type) => schema_type,
            None if raw.properties.is_some() => SchemaType::Object,
            None if raw.items.is_some() => SchemaType::Array,
            None => return Ok(Schema::Any),
        };

        let schema = match schema_type {
            SchemaType::Object => Schema::Object(ObjectSchema {
                properties: raw.properties.unwrap_or_default(),
                required: raw.required.unwrap_or_default(),
                additional_properties: raw.additional_properties,
            }),
            SchemaType::Array => Schema::Array(ArraySchema { items: raw.items }),
            SchemaType::String => Schema::String(StringSchema {
                enum_values: enum_values(raw.enum_values, "string", |value| match value {
                    Value::String(s) => Some(s),
                    _ => None,
                })?,
            }),
            SchemaType::Number | SchemaType::Integer => {
                let numeric = NumberSchema {
                    minimum: raw.minimum,
                    maximum: raw.maximum,
                    enum_values: enum_values(raw.enum_values, "number", |value| match value {
                        Value::Number(n) => Some(n),
                        _ => None,
                    })?,
                };
                if schema_type == SchemaType::Integer {
                    Schema::Integer(numeric)
                } else {
                    Schema::Number(numeric)
                }
            }
            SchemaType::Boolean => Schema::Boolean(BooleanSchema {
                enum_values: enum_values(raw.enum_values, "boolean", |value| match value {
                    Value::Bool(b) => Some(b),
                    _ => None,
                })?,
            }),
            SchemaType::Null => Schema::Null,
        };
        Ok(schema)
    }
}

fn enum_values<T>(
    values: Option<Vec<Value>>,
    expected: &str,
    extract: impl Fn(Value) -> Option<T>,
) -> Result<Option<Vec<T>>, String> {
    values
        .map(|values| {
            values
                .into_iter()
                .map(|value| {
                    let shown = value.to_string();
                    extract(value)
                        .ok_or_else(|| format!("enum value {shown} is not of type {expected}"))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}
