pub mod response;
pub mod routes;

pub use response::{AxumResponseBuilder, response_builder};
// Re-export HTTP traits from vigil_core for convenience
pub use vigil_core::{RequestData, ResponseBuilder, ResponseHelpers, UserRequest};
