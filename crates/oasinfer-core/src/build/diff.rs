//! Structural comparison of two schemas.

use crate::openapi::{ArraySchema, Items, ObjectSchema, Schema};

/// A step from a schema node into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// The named property of an object.
    Property(String),
    /// The items of an array.
    Items,
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Property(name) => write!(f, ".{name}"),
            PathSegment::Items => f.write_str("[]"),
        }
    }
}

/// A location inside a schema, from the root.
pub type SchemaPath = Vec<PathSegment>;

/// The differences found between two schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// Locations where the two schemas have different shapes.
    pub differing_types: Vec<SchemaPath>,

    /// Properties present in only one of two compared objects.
    pub differing_keys: Vec<SchemaPath>,
}

impl SchemaDiff {
    /// The number of differences of either kind.
    pub fn total(&self) -> usize {
        self.differing_types.len() + self.differing_keys.len()
    }

    /// Whether the two schemas have the same structure.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn extend(&mut self, other: SchemaDiff) {
        self.differing_types.extend(other.differing_types);
        self.differing_keys.extend(other.differing_keys);
    }
}

/// Compares `a` and `b` structurally, reporting locations relative to `path`.
///
/// Literal values, bounds and `required` lists are not compared.
pub fn diff(a: &Schema, b: &Schema, path: &[PathSegment]) -> SchemaDiff {
    let mut result = SchemaDiff::default();
    if a.kind() != b.kind() {
        result.differing_types.push(path.to_vec());
        return result;
    }

    match (a, b) {
        (Schema::Object(a), Schema::Object(b)) => result.extend(diff_objects(a, b, path)),
        (Schema::Array(a), Schema::Array(b)) => result.extend(diff_arrays(a, b, path)),
        (Schema::Ref(a), Schema::Ref(b)) if a != b => result.differing_types.push(path.to_vec()),
        (Schema::OneOf(a), Schema::OneOf(b))
        | (Schema::AnyOf(a), Schema::AnyOf(b))
        | (Schema::AllOf(a), Schema::AllOf(b))
            if a != b =>
        {
            result.differing_types.push(path.to_vec())
        }
        _ => {}
    }
    result
}

fn diff_objects(a: &ObjectSchema, b: &ObjectSchema, path: &[PathSegment]) -> SchemaDiff {
    let mut result = SchemaDiff::default();
    let child = |name: &str| {
        let mut child = path.to_vec();
        child.push(PathSegment::Property(name.to_string()));
        child
    };

    for (name, schema) in a.properties.iter() {
        match b.properties.get(name) {
            Some(other) => result.extend(diff(schema, other, &child(name))),
            None => result.differing_keys.push(child(name)),
        }
    }
    for name in b.properties.keys() {
        if !a.properties.contains_key(name) {
            result.differing_keys.push(child(name));
        }
    }
    result
}

fn diff_arrays(a: &ArraySchema, b: &ArraySchema, path: &[PathSegment]) -> SchemaDiff {
    let mut result = SchemaDiff::default();
    match (&a.items, &b.items) {
        (Some(Items::Single(a)), Some(Items::Single(b))) => {
            let mut child = path.to_vec();
            child.push(PathSegment::Items);
            result.extend(diff(a, b, &child));
        }
        (Some(Items::Tuple(a)), Some(Items::Tuple(b))) if a == b => {}
        (None, None) => {}
        _ => result.differing_types.push(path.to_vec()),
    }
    result
}
