use axum::{
    Json,
    extract::{FromRef, State},
    response::IntoResponse,
};
use foerdercheck_application::DocumentCheckUseCase;
use foerdercheck_core::{EligibilityRecordStore, EligibilityUpdate};

use super::error::ApiError;
use crate::auth_validation::{BearerTokenValidator, Principal};

/// Shared by the document-check routes: the record store plus the validator
/// the `Principal` extractor needs.
#[derive(Clone)]
pub struct DocumentCheckState<R> {
    pub record_store: R,
    pub validator: BearerTokenValidator,
}

impl<R> FromRef<DocumentCheckState<R>> for BearerTokenValidator {
    fn from_ref(state: &DocumentCheckState<R>) -> Self {
        state.validator.clone()
    }
}

#[tracing::instrument(name = "Save document check", skip_all, fields(owner = %principal.email))]
pub async fn save_document_check<R>(
    State(state): State<DocumentCheckState<R>>,
    principal: Principal,
    Json(update): Json<EligibilityUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
    R: EligibilityRecordStore + Clone + 'static,
{
    let use_case = DocumentCheckUseCase::new(&state.record_store);
    let record = use_case.save(&principal.email, update).await?;
    Ok(Json(record))
}

#[tracing::instrument(name = "Load document check", skip_all, fields(owner = %principal.email))]
pub async fn load_document_check<R>(
    State(state): State<DocumentCheckState<R>>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiError>
where
    R: EligibilityRecordStore + Clone + 'static,
{
    let use_case = DocumentCheckUseCase::new(&state.record_store);
    let record = use_case.load(&principal.email).await?;
    Ok(Json(record))
}
