use std::{path::PathBuf, sync::Arc};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// JSON file-backed store for a single document.
///
/// The current document lives in memory behind a `RwLock`. Replacing it holds
/// the write lock while the new value is written to a sibling temp file and
/// renamed over the target, so readers see either the previous document or
/// the new one and concurrent writers are serialized. The in-memory copy is
/// only swapped after the rename succeeds.
#[derive(Clone)]
pub struct JsonDocStore<T> {
    inner: Arc<RwLock<Option<T>>>,
    file_path: PathBuf,
}

impl<T> JsonDocStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Initialize the store from a path. A missing file means no document yet;
    /// an unreadable one is logged and treated the same way.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Io(e.to_string()))?;
        }

        let doc: Option<T> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "ignoring unreadable document file");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(ServiceError::Io(e.to_string())),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(doc)), file_path }))
    }

    /// Current document, if one has been stored.
    pub async fn get(&self) -> Option<T> {
        self.inner.read().await.clone()
    }

    /// Replace the document wholesale and persist it.
    pub async fn replace(&self, value: T) -> Result<T, ServiceError> {
        let mut doc = self.inner.write().await;
        self.persist(&value).await?;
        *doc = Some(value.clone());
        Ok(value)
    }

    async fn persist(&self, value: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(value).map_err(|e| ServiceError::Io(e.to_string()))?;
        let tmp = self.temp_path();

        let write = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, &self.file_path).await
        };
        if let Err(e) = write.await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Io(e.to_string()));
        }
        debug!(path = %self.file_path.display(), bytes = data.len(), "document persisted");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into());
        self.file_path.with_file_name(format!(".{name}.tmp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        a: String,
        b: String,
    }

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_doc_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn json_doc_store_replace_persists() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonDocStore::<Doc>::new(&tmp).await?;

        // initially empty, nothing written to disk
        assert!(store.get().await.is_none());
        assert!(!tmp.exists());

        store.replace(Doc { a: "1".into(), b: "x".into() }).await?;
        store.replace(Doc { a: "2".into(), b: "y".into() }).await?;
        assert_eq!(store.get().await, Some(Doc { a: "2".into(), b: "y".into() }));

        // reload from disk
        let reloaded = JsonDocStore::<Doc>::new(&tmp).await?;
        assert_eq!(reloaded.get().await, Some(Doc { a: "2".into(), b: "y".into() }));
        assert!(!store.temp_path().exists());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"{not json").await?;
        let store = JsonDocStore::<Doc>::new(&tmp).await?;
        assert!(store.get().await.is_none());

        store.replace(Doc { a: "ok".into(), b: "ok".into() }).await?;
        let reloaded = JsonDocStore::<Doc>::new(&tmp).await?;
        assert_eq!(reloaded.get().await.map(|d| d.a), Some("ok".to_string()));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_document() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_doc_store_dir_{}", uuid::Uuid::new_v4()));
        let path = dir.join("doc.json");
        let store = JsonDocStore::<Doc>::new(&path).await?;
        store.replace(Doc { a: "kept".into(), b: "kept".into() }).await?;

        // a directory where the file should be makes the rename fail
        tokio::fs::remove_file(&path).await?;
        tokio::fs::create_dir(&path).await?;
        tokio::fs::write(path.join("occupied"), b"x").await?;

        assert!(store.replace(Doc { a: "new".into(), b: "new".into() }).await.is_err());
        assert_eq!(store.get().await.map(|d| d.a), Some("kept".to_string()));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
