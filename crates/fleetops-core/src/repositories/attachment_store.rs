//! Attachment blob store trait (port)
//!
//! Writes are two-phase: `stage` parks the bytes outside the permanent
//! tree, the owning row is committed referencing the final key, and only
//! then is the blob promoted. A failed row write discards the staging copy,
//! so no permanent blob can be orphaned by a partial failure.

use async_trait::async_trait;

use crate::error::DomainError;

/// Raw upload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A staged blob: written to the staging area, not yet promoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAttachment {
    /// Location inside the staging area.
    pub staging_key: String,
    /// Key the blob will live under once promoted; stored on the row.
    pub final_key: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Writes the bytes to the staging area under the given key prefix.
    async fn stage(
        &self,
        prefix: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StagedAttachment, DomainError>;

    /// Moves a staged blob to its final key.
    async fn promote(&self, staged: &StagedAttachment) -> Result<(), DomainError>;

    /// Drops a staged blob that will not be promoted.
    async fn discard(&self, staged: &StagedAttachment) -> Result<(), DomainError>;

    /// Removes a promoted blob.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
