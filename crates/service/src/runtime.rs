//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data directory and message file location are usable.
pub async fn ensure_env(data_dir: &str, message_file: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, message_file).await
}
