//! Operations built from, and updated with, observed exchanges.

use super::{
    media_type::{text_schema, update_content},
    parameters::ParameterBuilder,
};
use crate::{
    config::{UpdateConfig, UpdateMode},
    error::{InferenceError, Result},
    exchange::{HttpExchange, HttpRequest, HttpResponse, ParamValue},
    openapi::{
        Header, HttpMethod, Map, Operation, Parameter, ParameterIn, PathItem, RefOr, RequestBody,
        Response,
    },
};

/// Description given to every inferred response.
pub const RESPONSE_DESCRIPTION: &str = "Response";

/// Builds an operation from `exchange`, or folds it into `existing`.
pub fn merge_operation(
    existing: Option<&Operation>,
    exchange: &HttpExchange,
    config: &UpdateConfig,
) -> Result<Operation> {
    let mode = config.mode;
    let request = &exchange.request;
    let status = exchange.response.status_code.to_string();

    let Some(existing) = existing else {
        let response = update_response(None, &exchange.response, config)?;
        let mut responses = Map::new();
        responses.insert(status, RefOr::T(response));
        let mut operation = Operation::new().responses(responses);
        operation.request_body = update_request_body(None, request, mode)?;

        let mut parameters = ParameterBuilder::new(ParameterIn::Query).build(&request.query, mode);
        parameters.extend(
            ParameterBuilder::new(ParameterIn::Header)
                .build(&recorded_headers(request, config), mode),
        );
        if !parameters.is_empty() {
            operation = operation.parameters(parameters);
        }
        return Ok(operation);
    };

    let mut operation = existing.clone();
    let existing_response = match existing.responses.get(&status) {
        Some(RefOr::Ref(_)) => {
            return Err(InferenceError::ReferenceNotSupported {
                location: format!("response {status}"),
            });
        }
        Some(RefOr::T(response)) => Some(response),
        None => None,
    };
    let response = update_response(existing_response, &exchange.response, config)?;
    operation.responses.insert(status, RefOr::T(response));

    let existing_body = match &existing.request_body {
        Some(RefOr::Ref(_)) => {
            return Err(InferenceError::ReferenceNotSupported {
                location: "request body".to_string(),
            });
        }
        Some(RefOr::T(body)) => Some(body),
        None => None,
    };
    operation.request_body = update_request_body(existing_body, request, mode)?;

    let existing_params = existing.parameters.as_deref().unwrap_or_default();
    let params = ParameterBuilder::new(ParameterIn::Query).update(
        &request.query,
        mode,
        existing_params,
        false,
    );
    let params = ParameterBuilder::new(ParameterIn::Header).update(
        &recorded_headers(request, config),
        mode,
        &params,
        false,
    );
    let params = dedup_parameters(params);
    operation.parameters = (!params.is_empty()).then_some(params);

    Ok(operation)
}

/// Returns `path_item` with the operation for `method` replaced.
pub fn set_method(path_item: PathItem, method: HttpMethod, operation: Operation) -> PathItem {
    path_item.with_operation(method, operation)
}

fn update_response(
    existing: Option<&Response>,
    observed: &HttpResponse,
    config: &UpdateConfig,
) -> Result<Response> {
    let mut response = existing
        .cloned()
        .unwrap_or_else(|| Response::new(RESPONSE_DESCRIPTION));
    response.content = update_content(
        response.content.as_ref(),
        observed.body.as_deref(),
        config.mode,
    )?;
    response.headers = update_response_headers(response.headers.take(), observed, config)?;
    Ok(response)
}

fn update_response_headers(
    mut headers: Option<Map<String, RefOr<Header>>>,
    observed: &HttpResponse,
    config: &UpdateConfig,
) -> Result<Option<Map<String, RefOr<Header>>>> {
    for (name, value) in observed.headers.iter() {
        if config.ignores_response_header(name) {
            continue;
        }
        let ParamValue::Single(value) = value else {
            tracing::warn!(header = %name, "dropping array-valued response header");
            continue;
        };

        let name = name.to_ascii_lowercase();
        let entries = headers.get_or_insert_with(Map::new);
        let header = match entries.get(&name) {
            Some(RefOr::Ref(_)) => {
                return Err(InferenceError::ReferenceNotSupported {
                    location: format!("response header {name}"),
                });
            }
            Some(RefOr::T(header)) => {
                let mut header = header.clone();
                header.schema = Some(text_schema(value, config.mode, header.schema.as_ref()));
                header
            }
            None => Header::new(text_schema(value, config.mode, None)),
        };
        entries.insert(name, RefOr::T(header));
    }
    Ok(headers)
}

fn update_request_body(
    existing: Option<&RequestBody>,
    request: &HttpRequest,
    mode: UpdateMode,
) -> Result<Option<RefOr<RequestBody>>> {
    let content = update_content(
        existing.map(|body| &body.content),
        request.body.as_deref(),
        mode,
    )?;
    Ok(content.map(|content| {
        let mut body = existing.cloned().unwrap_or_default();
        body.content = content;
        RefOr::T(body)
    }))
}

/// Request headers recorded as header parameters.
fn recorded_headers(request: &HttpRequest, config: &UpdateConfig) -> Map<String, ParamValue> {
    request
        .headers
        .iter()
        .filter(|(name, _)| !config.ignores_request_header(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Keeps the last occurrence of each `(name, in)` pair, at the position of its first one.
fn dedup_parameters(params: Vec<RefOr<Parameter>>) -> Vec<RefOr<Parameter>> {
    let key = |param: &RefOr<Parameter>| match param {
        RefOr::T(param) => (param.name.clone(), Some(param.in_)),
        RefOr::Ref(reference) => (reference.ref_path.clone(), None),
    };

    let mut deduped: Vec<RefOr<Parameter>> = Vec::with_capacity(params.len());
    for param in params {
        match deduped.iter().position(|seen| key(seen) == key(&param)) {
            Some(idx) => deduped[idx] = param,
            None => deduped.push(param),
        }
    }
    deduped
}
