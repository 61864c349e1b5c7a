pub mod auth_token;
pub mod check;
pub mod email;
pub mod name;
pub mod password;
pub mod payload;
pub mod phone_number;
pub mod user;
