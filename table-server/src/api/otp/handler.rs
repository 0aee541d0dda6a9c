//! OTP API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::sessions::SessionService;
use crate::utils::AppResult;

/// POST /api/otp/request 请求体
///
/// Missing fields default to empty so the service can reject them with a
/// user-facing validation message instead of a bare deserialization error.
#[derive(Debug, Deserialize)]
pub struct RequestOtpPayload {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub table_number: String,
}

#[derive(Debug, Serialize)]
pub struct RequestOtpResponse {
    pub phone: String,
}

/// POST /api/otp/verify 请求体
#[derive(Debug, Deserialize)]
pub struct VerifyOtpPayload {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub table_number: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub phone: String,
    pub name: String,
}

/// POST /api/otp/request - 发送验证码
pub async fn request_code(
    State(state): State<ServerState>,
    Json(payload): Json<RequestOtpPayload>,
) -> AppResult<Json<RequestOtpResponse>> {
    let service = SessionService::new(state.db.clone(), state.sms.clone());
    let phone = service
        .issue_code(
            &payload.phone,
            &payload.name,
            &payload.restaurant_id,
            &payload.location_id,
            &payload.table_number,
        )
        .await?;
    Ok(Json(RequestOtpResponse { phone }))
}

/// POST /api/otp/verify - 校验验证码
pub async fn verify_code(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyOtpPayload>,
) -> AppResult<Json<VerifyOtpResponse>> {
    let service = SessionService::new(state.db.clone(), state.sms.clone());
    let verified = service
        .verify_code(
            &payload.phone,
            &payload.code,
            &payload.restaurant_id,
            &payload.location_id,
            &payload.table_number,
        )
        .await?;
    Ok(Json(VerifyOtpResponse {
        phone: verified.phone,
        name: verified.name,
    }))
}
