//! Auth module: admin credential check and bearer token lifecycle.
//!
//! `token` signs and verifies tokens; `service` compares login input against
//! the configured admin credentials and issues tokens on success.

pub mod domain;
pub mod errors;
pub mod token;
pub mod service;

pub use service::AuthService;
pub use token::TokenService;
