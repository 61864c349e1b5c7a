pub mod authorize;
pub mod create_user;
pub mod delete_user;
pub mod read_user;
pub mod update_user;
