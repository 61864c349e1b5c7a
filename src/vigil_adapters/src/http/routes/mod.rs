pub mod users;

pub use users::users;
