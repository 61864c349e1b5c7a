//! Framework-agnostic handlers.
//!
//! Routes extract what they need from the framework request, build a
//! [`vigil_core::UserRequest`], call into these handlers, and hand back
//! whatever their [`vigil_core::ResponseBuilder`] produces.

pub mod users;

pub use users::{UsersState, dispatch_users, handle_users};
