use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method},
    response::Response,
};
use serde_json::Value;
use vigil_core::{CheckStore, PasswordHasher, Payload, RequestData, TokenService, UserStore};

use crate::handlers::{UsersState, handle_users};
use crate::http::response_builder;

/// `/users` for every method.
///
/// The payload is the JSON body. For `GET` and `DELETE`, query string pairs
/// are layered on top and win over body fields of the same name. A body that
/// is empty or not JSON contributes nothing.
pub async fn users<U, C, T, H>(
    State(state): State<UsersState<U, C, T, H>>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response
where
    U: UserStore + Clone + 'static,
    C: CheckStore + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let request = to_request(&method, &headers, query, &body);
    handle_users(&state, &request, response_builder()).await
}

fn to_request(
    method: &Method,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    body: &[u8],
) -> RequestData {
    let mut payload = serde_json::from_slice::<Value>(body)
        .map(Payload::from)
        .unwrap_or_default();
    if matches!(*method, Method::GET | Method::DELETE) {
        for (key, value) in query {
            payload.insert(key, Value::String(value));
        }
    }

    headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
        .fold(RequestData::new(method.as_str(), payload), |request, (name, value)| {
            request.with_header(name, value)
        })
}
