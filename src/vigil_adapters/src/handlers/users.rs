use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use vigil_application::{
    CreateUserUseCase, DEFAULT_CHECK_TIMEOUT, DeleteUserUseCase, ReadUserUseCase,
    UpdateUserUseCase, UserOperationError, messages,
};
use vigil_core::{
    CallbackResponder, CheckStore, PasswordHasher, ResponseBuilder, ResponseHelpers, TokenService,
    UserRequest, UserStore, validation::AUTHORIZATION_HEADER,
};

/// Everything the users resource needs, cloned into each use case per request.
#[derive(Clone)]
pub struct UsersState<U, C, T, H> {
    pub user_store: U,
    pub check_store: C,
    pub token_service: T,
    pub hasher: H,
    pub check_timeout: Duration,
}

impl<U, C, T, H> UsersState<U, C, T, H> {
    pub fn new(user_store: U, check_store: C, token_service: T, hasher: H) -> Self {
        Self {
            user_store,
            check_store,
            token_service,
            hasher,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }
}

/// Serves one request against the users resource.
///
/// Dispatches on the method (case-insensitively) and emits exactly one
/// response through `builder`. Successes use the transport's default status;
/// failures carry their status code and a `{message}` body.
#[tracing::instrument(name = "Users", skip_all, fields(method = %request.method()))]
pub async fn handle_users<U, C, T, H, R, B>(
    state: &UsersState<U, C, T, H>,
    request: &R,
    builder: B,
) -> B::Response
where
    U: UserStore + Clone,
    C: CheckStore + Clone + 'static,
    T: TokenService + Clone,
    H: PasswordHasher + Clone,
    R: UserRequest,
    B: ResponseBuilder,
{
    let payload = request.payload();
    let token = request.header(AUTHORIZATION_HEADER);

    let outcome = match request.method().to_ascii_uppercase().as_str() {
        "GET" => ReadUserUseCase::new(state.user_store.clone(), state.token_service.clone())
            .execute(payload, token)
            .await
            .and_then(|profile| to_body(profile, messages::READ_FAILED)),
        "POST" => CreateUserUseCase::new(state.user_store.clone(), state.hasher.clone())
            .execute(payload)
            .await
            .and_then(|user| to_body(user.profile(), messages::CREATE_FAILED)),
        "PUT" => UpdateUserUseCase::new(
            state.user_store.clone(),
            state.token_service.clone(),
            state.hasher.clone(),
        )
        .execute(payload, token)
        .await
        .and_then(|user| to_body(user.profile(), messages::UPDATE_FAILED)),
        "DELETE" => DeleteUserUseCase::new(
            state.user_store.clone(),
            state.check_store.clone(),
            state.token_service.clone(),
        )
        .with_check_timeout(state.check_timeout)
        .execute(payload, token)
        .await
        .map(|()| serde_json::json!({ "message": messages::USER_DELETED })),
        _ => Err(UserOperationError::MethodNotAllowed),
    };

    match outcome {
        Ok(body) => builder.json(body),
        Err(e) => {
            tracing::debug!(status = e.status_code(), error = %e, "Request failed");
            builder.message(e.status_code(), &e.to_string())
        }
    }
}

/// Serves `request` and reports the result through `callback(status, body)`.
///
/// `status` is `None` on success, meaning the transport default. The callback
/// runs exactly once.
pub async fn dispatch_users<U, C, T, H, R, F>(
    state: &UsersState<U, C, T, H>,
    request: &R,
    callback: F,
) where
    U: UserStore + Clone,
    C: CheckStore + Clone + 'static,
    T: TokenService + Clone,
    H: PasswordHasher + Clone,
    R: UserRequest,
    F: FnOnce(Option<u16>, Value),
{
    handle_users(state, request, CallbackResponder::new(callback)).await
}

/// Serializes a response body, failing with `failure` if that is impossible.
fn to_body(value: impl Serialize, failure: &'static str) -> Result<Value, UserOperationError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize response body");
        UserOperationError::Internal(failure)
    })
}
