use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::history::storage::{KeyValueStorage, StorageError};
use crate::models::cv::CvContent;
use crate::models::version::{CvVersion, VersionMeta};

/// Default number of versions retained per document.
pub const MAX_VERSIONS: usize = 30;

const KEY_PREFIX: &str = "cv-versions-";

/// Bounded, most-recent-first history of CV snapshots, one list per document.
///
/// Each document's list is stored as a single JSON array under
/// `cv-versions-<document_id>`. Writes are read-modify-write, so they are
/// serialized through `write_lock`; this covers a single service instance
/// only.
#[derive(Clone)]
pub struct VersionStore {
    storage: Arc<dyn KeyValueStorage>,
    max_versions: usize,
    write_lock: Arc<Mutex<()>>,
}

impl VersionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, max_versions: usize) -> Self {
        Self {
            storage,
            max_versions: max_versions.max(1),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn max_versions(&self) -> usize {
        self.max_versions
    }

    /// All versions of a document, newest first.
    ///
    /// A corrupt persisted list reads as empty; only backend failures error.
    pub async fn list_versions(&self, document_id: &str) -> Result<Vec<CvVersion>, StorageError> {
        let key = storage_key(document_id);
        let Some(raw) = self.storage.get(&key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<CvVersion>>(&raw) {
            Ok(versions) => Ok(versions),
            Err(e) => {
                warn!("Discarding unreadable version history at '{key}': {e}");
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_version(
        &self,
        document_id: &str,
        version_id: &str,
    ) -> Result<Option<CvVersion>, StorageError> {
        Ok(self
            .list_versions(document_id)
            .await?
            .into_iter()
            .find(|v| v.id == version_id))
    }

    /// Records a new snapshot at the head of the list, dropping the oldest
    /// entries beyond the cap.
    pub async fn save_version(
        &self,
        document_id: &str,
        content: CvContent,
        label: &str,
        meta: VersionMeta,
    ) -> Result<CvVersion, StorageError> {
        let _guard = self.write_lock.lock().await;

        let version = CvVersion {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            label: label.to_string(),
            content,
            meta,
        };

        let mut versions = self.list_versions(document_id).await?;
        versions.insert(0, version.clone());
        if versions.len() > self.max_versions {
            debug!(
                "Dropping {} oldest version(s) of document {document_id}",
                versions.len() - self.max_versions
            );
            versions.truncate(self.max_versions);
        }
        self.persist(document_id, &versions).await?;

        info!(
            "Saved version {} ('{}') for document {document_id}",
            version.id, version.label
        );
        Ok(version)
    }

    /// Removes one snapshot. Unknown ids leave the list untouched.
    pub async fn delete_version(&self, document_id: &str, version_id: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut versions = self.list_versions(document_id).await?;
        let before = versions.len();
        versions.retain(|v| v.id != version_id);
        if versions.len() == before {
            debug!("Version {version_id} of document {document_id} not found; nothing to delete");
            return Ok(());
        }
        self.persist(document_id, &versions).await?;

        info!("Deleted version {version_id} of document {document_id}");
        Ok(())
    }

    pub async fn clear_versions(&self, document_id: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(&storage_key(document_id)).await?;
        info!("Cleared version history of document {document_id}");
        Ok(())
    }

    async fn persist(&self, document_id: &str, versions: &[CvVersion]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(versions)?;
        self.storage.set(&storage_key(document_id), raw).await
    }
}

fn storage_key(document_id: &str) -> String {
    format!("{KEY_PREFIX}{document_id}")
}
