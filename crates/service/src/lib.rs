//! Service layer for the announcement API.
//! - `auth`: admin credential check and signed token issue/verify.
//! - `message`: the singleton message store and its persistence backends.
//! - `storage`: reusable file-backed primitives.

pub mod errors;
pub mod auth;
pub mod message;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
