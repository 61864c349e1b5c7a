//! Transport-agnostic request and response traits for the users resource.
//!
//! The users handler never sees a framework type. Transports hand it something
//! implementing [`UserRequest`] and a [`ResponseBuilder`] of their own, and get
//! their native response back from [`ResponseBuilder::build`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  vigil_core: request/response traits     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  vigil_adapters: users handler,          │
//! │  AxumResponseBuilder, CallbackResponder  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! `build` consumes the builder, so a handler can emit at most one response
//! per request. [`CallbackResponder`] leans on this to expose the classic
//! `callback(status, body)` contract with a single-fire guarantee.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::payload::Payload;

/// Trait for requests the users handler can serve.
pub trait UserRequest {
    /// Get a header value by name.
    ///
    /// Header lookup is case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// The decoded body (or query string) of the request.
    fn payload(&self) -> &Payload;
}

/// A plain, owned request. Transports that parse eagerly build one of these.
#[derive(Debug, Clone, Default)]
pub struct RequestData {
    pub method: String,
    headers: HashMap<String, String>,
    pub payload: Payload,
}

impl RequestData {
    pub fn new(method: impl Into<String>, payload: Payload) -> Self {
        Self {
            method: method.into(),
            headers: HashMap::new(),
            payload,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

impl UserRequest for RequestData {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Trait for building the single response to a request.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(404)
///     .json_body(json!({"message": "User not found"}))
///     .build()
/// ```
///
/// A builder whose status is never set answers with the transport default
/// (200 for HTTP).
pub trait ResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: Value) -> Self;

    /// Build the final response
    ///
    /// This consumes the builder and produces the transport's response type.
    fn build(self) -> Self::Response;
}

/// Helper methods for the response shapes used by the users resource.
pub trait ResponseHelpers: ResponseBuilder {
    /// Respond with the default status and a JSON body
    fn json(self, body: Value) -> Self::Response {
        self.json_body(body).build()
    }

    /// Respond with the default status and a `{message}` body
    fn ok_message(self, message: &str) -> Self::Response {
        self.json(serde_json::json!({ "message": message }))
    }

    /// Respond with an explicit status and a `{message}` body
    fn message(self, code: u16, message: &str) -> Self::Response {
        self.status(code)
            .json_body(serde_json::json!({ "message": message }))
            .build()
    }
}

// Blanket implementation for all ResponseBuilder types
impl<T: ResponseBuilder> ResponseHelpers for T {}

/// Delivers the response to a `FnOnce(status, body)` callback.
///
/// The status is `None` unless the handler set one explicitly. Headers are
/// dropped since the callback contract has no place for them.
pub struct CallbackResponder<F> {
    status: Option<u16>,
    body: Value,
    callback: F,
}

impl<F> CallbackResponder<F>
where
    F: FnOnce(Option<u16>, Value),
{
    pub fn new(callback: F) -> Self {
        Self {
            status: None,
            body: Value::Object(Default::default()),
            callback,
        }
    }
}

impl<F> ResponseBuilder for CallbackResponder<F>
where
    F: FnOnce(Option<u16>, Value),
{
    type Response = ();

    fn status(mut self, code: u16) -> Self {
        self.status = Some(code);
        self
    }

    fn header(self, _name: &str, _value: &str) -> Self {
        self
    }

    fn json_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    fn build(self) {
        (self.callback)(self.status, self.body)
    }
}
