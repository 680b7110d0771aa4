//! Message module: the singleton announcement.
//!
//! `repository` is the persistence seam with `repo::file` and `repo::seaorm`
//! backends; `service::MessageStore` validates input on top of it.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::MessageStore;
