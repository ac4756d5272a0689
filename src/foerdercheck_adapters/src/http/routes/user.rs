use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use foerdercheck_core::{Email, RemoteUser, RemoteUserId, UserProvisioningGateway};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: RemoteUser,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDataRequest {
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEligibilityRequest {
    pub user_id: String,
    pub eligibility_data: Value,
}

#[tracing::instrument(name = "Create user", skip_all)]
pub async fn create_user<G>(
    State(gateway): State<G>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: UserProvisioningGateway + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let user = gateway.create_user(&email).await?;

    Ok((StatusCode::CREATED, Json(CreateUserResponse { user })))
}

/// Completes provisioning for an identity whose data row is missing.
#[tracing::instrument(name = "Create user data", skip_all)]
pub async fn create_user_data<G>(
    State(gateway): State<G>,
    Json(request): Json<CreateUserDataRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: UserProvisioningGateway + Clone + 'static,
{
    let user_id = RemoteUserId::parse(&request.user_id)?;
    gateway.create_user_data(&user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "userId": user_id })),
    ))
}

#[tracing::instrument(name = "Store eligibility data", skip_all)]
pub async fn store_eligibility_data<G>(
    State(gateway): State<G>,
    Json(request): Json<StoreEligibilityRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: UserProvisioningGateway + Clone + 'static,
{
    let user_id = RemoteUserId::parse(&request.user_id)?;
    gateway
        .store_eligibility_data(&user_id, request.eligibility_data)
        .await?;

    Ok(Json(json!({ "success": true })))
}
