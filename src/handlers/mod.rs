pub mod admin;
pub mod auth;
pub mod complaint;

pub use auth::*;
