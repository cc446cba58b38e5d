//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, web};

#[derive(Debug, serde::Serialize)]
struct HealthStatus {
    status: &'static str,
    database: bool,
    files: bool,
}

/// Liveness plus a storage ping
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let storage = state.storage.health_check().await?;

    let status = HealthStatus {
        status: if storage.overall { "ok" } else { "degraded" },
        database: storage.database,
        files: storage.files,
    };

    if storage.overall {
        Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::success(status)))
    }
}
