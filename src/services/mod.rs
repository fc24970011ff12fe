pub mod auth;
pub mod bookmark;
pub mod token;
pub mod user;
