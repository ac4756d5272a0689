use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    eligibility_record::{EligibilityRecord, EligibilityUpdate, OwnerId},
    email::Email,
};

// VerifiedEmailRegistry port trait and errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Verified email registry unavailable: {0}")]
    Unavailable(String),
}

/// Set of email addresses that completed verification. Entries are never removed.
#[async_trait]
pub trait VerifiedEmailRegistry: Send + Sync {
    /// Idempotent: marking an already verified address is a no-op.
    async fn mark_verified(&self, email: &Email) -> Result<(), RegistryError>;
    async fn is_verified(&self, email: &Email) -> Result<bool, RegistryError>;
}

// EligibilityRecordStore port trait and errors
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Keyed upsert store holding one eligibility record per owner.
///
/// `save` is a read-modify-write. Concurrent saves for the same owner may race
/// and the last write wins, but a record is always written whole.
#[async_trait]
pub trait EligibilityRecordStore: Send + Sync {
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<EligibilityRecord>, RecordStoreError>;
    async fn save(
        &self,
        owner_id: &OwnerId,
        update: EligibilityUpdate,
    ) -> Result<EligibilityRecord, RecordStoreError>;
}

// Shared handles let callers pick an implementation at runtime.
#[async_trait]
impl<T: VerifiedEmailRegistry + ?Sized> VerifiedEmailRegistry for Arc<T> {
    async fn mark_verified(&self, email: &Email) -> Result<(), RegistryError> {
        (**self).mark_verified(email).await
    }

    async fn is_verified(&self, email: &Email) -> Result<bool, RegistryError> {
        (**self).is_verified(email).await
    }
}

#[async_trait]
impl<T: EligibilityRecordStore + ?Sized> EligibilityRecordStore for Arc<T> {
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<EligibilityRecord>, RecordStoreError> {
        (**self).get(owner_id).await
    }

    async fn save(
        &self,
        owner_id: &OwnerId,
        update: EligibilityUpdate,
    ) -> Result<EligibilityRecord, RecordStoreError> {
        (**self).save(owner_id, update).await
    }
}
