use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::any,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use vigil_adapters::{config::AllowedOrigins, handlers::UsersState, http::routes::users};
use vigil_core::{CheckStore, PasswordHasher, TokenService, UserStore};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// HTTP service exposing the users resource at `/users`.
pub struct VigilService {
    router: Router,
}

impl VigilService {
    /// Create a new VigilService around the stores, token service and hasher
    /// in `state`.
    ///
    /// Stores implement Clone via internal Arc so every request can take its
    /// own handle.
    pub fn new<U, C, T, H>(state: UsersState<U, C, T, H>) -> Self
    where
        U: UserStore + Clone + 'static,
        C: CheckStore + Clone + 'static,
        T: TokenService + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
    {
        let router = Router::new()
            .route("/users", any(users::<U, C, T, H>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the VigilService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on `listener`.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Vigil service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
