use axum::{Json, response::IntoResponse};
use foerdercheck_core::{EligibilityRequest, determine_eligibility};

#[tracing::instrument(name = "Check eligibility", skip_all)]
pub async fn check_eligibility(Json(request): Json<EligibilityRequest>) -> impl IntoResponse {
    let result = determine_eligibility(&request);
    tracing::info!(group = ?result.group, "Eligibility determined");
    Json(result)
}
