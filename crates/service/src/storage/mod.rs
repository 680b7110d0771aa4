//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores shared by the message backends.

pub mod json_doc_store;
