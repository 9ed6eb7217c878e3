//! Filesystem attachment store
//!
//! Blobs land in `<root>/.staging/` first and are renamed into their final
//! prefix on promote. Rename within one filesystem is atomic, so a promoted
//! key either exists completely or not at all.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use fleetops_core::error::DomainError;
use fleetops_core::repositories::{AttachmentStore, StagedAttachment};
use fleetops_shared::utils::file_extension;

const STAGING_DIR: &str = ".staging";

pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, DomainError> {
        // Keys come from our own rows, but never follow one out of the root.
        if key.split(['/', '\\']).any(|part| part == "..") {
            return Err(DomainError::StorageError(format!(
                "invalid attachment key: {key}"
            )));
        }
        Ok(self.root.join(key))
    }

    async fn ensure_parent(path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create blob directory {}: {}", parent.display(), e);
                DomainError::StorageError(e.to_string())
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn stage(
        &self,
        prefix: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StagedAttachment, DomainError> {
        let blob_name = match file_extension(file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let staged = StagedAttachment {
            staging_key: format!("{STAGING_DIR}/{blob_name}"),
            final_key: format!("{prefix}/{blob_name}"),
        };

        let path = self.resolve(&staged.staging_key)?;
        Self::ensure_parent(&path).await?;
        fs::write(&path, bytes).await.map_err(|e| {
            error!("Failed to stage attachment {}: {}", staged.staging_key, e);
            DomainError::StorageError(e.to_string())
        })?;

        debug!("Staged attachment {} ({} bytes)", staged.staging_key, bytes.len());
        Ok(staged)
    }

    async fn promote(&self, staged: &StagedAttachment) -> Result<(), DomainError> {
        let from = self.resolve(&staged.staging_key)?;
        let to = self.resolve(&staged.final_key)?;
        Self::ensure_parent(&to).await?;
        fs::rename(&from, &to).await.map_err(|e| {
            error!("Failed to promote attachment {}: {}", staged.final_key, e);
            DomainError::StorageError(e.to_string())
        })?;

        debug!("Promoted attachment to {}", staged.final_key);
        Ok(())
    }

    async fn discard(&self, staged: &StagedAttachment) -> Result<(), DomainError> {
        let path = self.resolve(&staged.staging_key)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let path = self.resolve(key)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("fleetops-store-{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn stage_then_promote_moves_the_blob() {
        let root = TempRoot::new();
        let store = FsAttachmentStore::new(&root.0);

        let staged = store
            .stage("attachments/incomes", "receipt.pdf", b"pdf-bytes")
            .await
            .unwrap();
        assert!(root.0.join(&staged.staging_key).exists());
        assert!(!root.0.join(&staged.final_key).exists());
        assert!(staged.final_key.starts_with("attachments/incomes/"));
        assert!(staged.final_key.ends_with(".pdf"));

        store.promote(&staged).await.unwrap();
        assert!(!root.0.join(&staged.staging_key).exists());
        assert_eq!(
            std::fs::read(root.0.join(&staged.final_key)).unwrap(),
            b"pdf-bytes"
        );
    }

    #[tokio::test]
    async fn discard_removes_the_staged_blob() {
        let root = TempRoot::new();
        let store = FsAttachmentStore::new(&root.0);

        let staged = store
            .stage("attachments/incomes", "scan.png", b"png")
            .await
            .unwrap();
        store.discard(&staged).await.unwrap();
        assert!(!root.0.join(&staged.staging_key).exists());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let root = TempRoot::new();
        let store = FsAttachmentStore::new(&root.0);

        let err = store.delete("../outside.pdf").await.unwrap_err();
        assert!(matches!(err, DomainError::StorageError(_)));
    }
}
