use foerdercheck_core::{
    Email, EligibilityRecord, EligibilityRecordStore, EligibilityUpdate, OwnerId,
    RecordStoreError,
};

/// Document-check questionnaire scoped to the authenticated principal.
///
/// The principal's email is the owner key; holding a valid session token for
/// an address is sufficient to read and write that address's record.
pub struct DocumentCheckUseCase<'a, R>
where
    R: EligibilityRecordStore,
{
    record_store: &'a R,
}

impl<'a, R> DocumentCheckUseCase<'a, R>
where
    R: EligibilityRecordStore,
{
    pub fn new(record_store: &'a R) -> Self {
        Self { record_store }
    }

    #[tracing::instrument(name = "DocumentCheckUseCase::save", skip(self, update))]
    pub async fn save(
        &self,
        principal: &Email,
        update: EligibilityUpdate,
    ) -> Result<EligibilityRecord, RecordStoreError> {
        self.record_store
            .save(&OwnerId::from(principal), update)
            .await
    }

    #[tracing::instrument(name = "DocumentCheckUseCase::load", skip(self))]
    pub async fn load(
        &self,
        principal: &Email,
    ) -> Result<Option<EligibilityRecord>, RecordStoreError> {
        self.record_store.get(&OwnerId::from(principal)).await
    }
}
