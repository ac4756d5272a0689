use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use foerdercheck_core::{
    EligibilityRecord, EligibilityRecordStore, EligibilityUpdate, OwnerId, RecordStoreError,
};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
pub struct HashMapEligibilityRecordStore {
    records: Arc<RwLock<HashMap<OwnerId, EligibilityRecord>>>,
}

impl HashMapEligibilityRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EligibilityRecordStore for HashMapEligibilityRecordStore {
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<EligibilityRecord>, RecordStoreError> {
        let records = self.records.read().await;
        Ok(records.get(owner_id).cloned())
    }

    async fn save(
        &self,
        owner_id: &OwnerId,
        update: EligibilityUpdate,
    ) -> Result<EligibilityRecord, RecordStoreError> {
        // The write lock spans the read-modify-write, so saves never interleave.
        let mut records = self.records.write().await;
        let record = EligibilityRecord::upsert(
            records.remove(owner_id),
            owner_id.clone(),
            update,
            Utc::now(),
        );
        records.insert(owner_id.clone(), record.clone());
        Ok(record)
    }
}
