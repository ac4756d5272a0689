use chrono::{DateTime, Utc};
use foerdercheck_core::{
    EligibilityAnswers, EligibilityRecord, EligibilityRecordStore, EligibilityUpdate, OwnerId,
    RecordStoreError,
};
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};

#[derive(Clone)]
pub struct PostgresEligibilityRecordStore {
    pool: PgPool,
}

impl PostgresEligibilityRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the migrations shipped with this crate.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

fn unavailable(error: sqlx::Error) -> RecordStoreError {
    RecordStoreError::Unavailable(error.to_string())
}

fn record_from_row(row: &PgRow) -> Result<EligibilityRecord, RecordStoreError> {
    let corrupt = |e: sqlx::Error| RecordStoreError::Corrupt(e.to_string());

    let owner_id: String = row.try_get("owner_id").map_err(corrupt)?;
    let property_type: String = row.try_get("property_type").map_err(corrupt)?;
    let Json(answers): Json<EligibilityAnswers> = row.try_get("answers").map_err(corrupt)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(corrupt)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(corrupt)?;

    Ok(EligibilityRecord {
        owner_id: OwnerId::new(owner_id),
        property_type,
        answers,
        created_at,
        updated_at,
    })
}

#[async_trait::async_trait]
impl EligibilityRecordStore for PostgresEligibilityRecordStore {
    #[tracing::instrument(name = "Retrieving eligibility record from PostgreSQL", skip_all)]
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<EligibilityRecord>, RecordStoreError> {
        let row = sqlx::query(
            r#"
                SELECT owner_id, property_type, answers, created_at, updated_at
                FROM document_checks
                WHERE owner_id = $1
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        row.as_ref().map(record_from_row).transpose()
    }

    #[tracing::instrument(name = "Saving eligibility record to PostgreSQL", skip_all)]
    async fn save(
        &self,
        owner_id: &OwnerId,
        update: EligibilityUpdate,
    ) -> Result<EligibilityRecord, RecordStoreError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        // Row lock serializes concurrent saves for the same owner.
        let existing = sqlx::query(
            r#"
                SELECT owner_id, property_type, answers, created_at, updated_at
                FROM document_checks
                WHERE owner_id = $1
                FOR UPDATE
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(unavailable)?
        .as_ref()
        .map(record_from_row)
        .transpose()?;

        let record = EligibilityRecord::upsert(existing, owner_id.clone(), update, Utc::now());

        // A racing first save may have inserted meanwhile; the stored row wins for created_at.
        let row = sqlx::query(
            r#"
                INSERT INTO document_checks (owner_id, property_type, answers, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (owner_id) DO UPDATE
                SET property_type = EXCLUDED.property_type,
                    answers = EXCLUDED.answers,
                    updated_at = EXCLUDED.updated_at
                RETURNING owner_id, property_type, answers, created_at, updated_at
            "#,
        )
        .bind(record.owner_id.as_str())
        .bind(&record.property_type)
        .bind(Json(&record.answers))
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(unavailable)?;

        let stored = record_from_row(&row)?;
        tx.commit().await.map_err(unavailable)?;

        Ok(stored)
    }
}
