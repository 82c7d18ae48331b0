pub mod admin;
pub mod auth;
pub mod complaint;
pub mod seed_admin;
