//! Query and header parameters inferred from observed requests.

use serde_json::Value;

use super::schema;
use crate::{
    config::UpdateMode,
    exchange::ParamValue,
    openapi::{Map, Parameter, ParameterIn, RefOr, Schema},
};

/// Builds and updates the parameters of one location.
///
/// Only inline parameters in the builder's location are ever touched. Parameters in other
/// locations and `$ref` parameters are passed through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ParameterBuilder {
    in_: ParameterIn,
}

impl ParameterBuilder {
    /// Creates a builder for parameters `in` the given location.
    pub fn new(in_: ParameterIn) -> Self {
        Self { in_ }
    }

    /// Builds the parameters of a first observation. Every parameter is optional.
    pub fn build(
        &self,
        params: &Map<String, ParamValue>,
        mode: UpdateMode,
    ) -> Vec<RefOr<Parameter>> {
        self.update(params, mode, &[], false)
    }

    /// Folds a new observation into `existing`.
    ///
    /// The result lists new parameters first, then parameters seen again, then parameters
    /// missing from this observation (now optional), then everything out of scope.
    pub fn update(
        &self,
        incoming: &Map<String, ParamValue>,
        mode: UpdateMode,
        existing: &[RefOr<Parameter>],
        set_new_as_required: bool,
    ) -> Vec<RefOr<Parameter>> {
        let mut observed: Vec<(String, Value)> = Vec::with_capacity(incoming.len());
        for (name, value) in incoming.iter() {
            let name = self.normalize_name(name);
            let value = value.to_json();
            match observed.iter_mut().find(|(seen, _)| *seen == name) {
                Some(entry) => entry.1 = value,
                None => observed.push((name, value)),
            }
        }

        let (in_scope, out_of_scope): (Vec<_>, Vec<_>) =
            existing.iter().cloned().partition(|param| match param {
                RefOr::T(param) => param.in_ == self.in_,
                RefOr::Ref(_) => false,
            });
        let in_scope: Vec<Parameter> = in_scope
            .into_iter()
            .filter_map(|param| match param {
                RefOr::T(param) => Some(param),
                RefOr::Ref(_) => None,
            })
            .collect();

        let mut new = Vec::new();
        let mut shared = Vec::new();
        for (name, value) in &observed {
            match in_scope.iter().find(|param| self.same_name(&param.name, name)) {
                Some(param) => shared.push(self.update_shared(param.clone(), value, mode)),
                None => {
                    let param = Parameter::new(name.clone(), self.in_)
                        .required(set_new_as_required)
                        .schema(new_schema(value, mode));
                    new.push(param);
                }
            }
        }

        let missing = in_scope
            .into_iter()
            .filter(|param| !observed.iter().any(|(name, _)| self.same_name(&param.name, name)))
            .map(|param| param.required(false));

        new.into_iter()
            .chain(shared)
            .chain(missing)
            .map(RefOr::T)
            .chain(out_of_scope)
            .collect()
    }

    fn update_shared(&self, param: Parameter, value: &Value, mode: UpdateMode) -> Parameter {
        if mode.generalizes() {
            return param;
        }
        let literal = schema::to_const(value);
        let schema = match param.schema.clone() {
            Some(existing) => schema::prepend_alternative(literal, existing),
            None => Schema::OneOf(vec![literal]),
        };
        param.schema(schema)
    }

    /// Header names match case-insensitively, query names exactly.
    fn same_name(&self, declared: &str, observed: &str) -> bool {
        match self.in_ {
            ParameterIn::Header => declared.eq_ignore_ascii_case(observed),
            _ => declared == observed,
        }
    }

    fn normalize_name(&self, name: &str) -> String {
        match self.in_ {
            ParameterIn::Header => name.to_ascii_lowercase(),
            _ => name.to_string(),
        }
    }
}

fn new_schema(value: &Value, mode: UpdateMode) -> Schema {
    if mode.generalizes() {
        schema::generalize(value)
    } else {
        Schema::OneOf(vec![schema::to_const(value)])
    }
}
