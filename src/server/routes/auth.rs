//! Password reset and token refresh endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordResponse {
    /// Reset token; delivery (mail etc.) is handled outside the API
    pub reset_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Issue a password reset token for an email address
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let reset_token = state.auth.request_password_reset(&request.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ForgotPasswordResponse { reset_token })))
}

/// Reset a password with a previously issued token
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    state
        .auth
        .reset_password(&request.token, &request.new_password)
        .await?;

    info!("Password reset completed");
    Ok(HttpResponse::Ok().json(ApiResponse::success("Password reset")))
}

/// Exchange a refresh token for a fresh token pair
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse, ApiError> {
    let tokens = state.auth.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens)))
}

/// Mount the auth routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/forgot-password", web::post().to(forgot_password))
            .route("/reset-password", web::post().to(reset_password))
            .route("/refresh", web::post().to(refresh)),
    );
}
