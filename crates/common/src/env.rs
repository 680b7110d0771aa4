//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the data directory and the parent of the message file exist.
pub async fn ensure_env(data_dir: &str, message_file: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;

    if let Some(parent) = Path::new(message_file).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }

    match tokio::fs::metadata(message_file).await {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{message_file} is a directory, expected a JSON file"));
        }
        Ok(_) => debug!(%message_file, "message file present"),
        Err(_) => warn!(%message_file, "message file not found; it will be created on first write"),
    }
    Ok(())
}
