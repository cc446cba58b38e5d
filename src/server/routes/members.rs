//! "What is my role here" endpoints
//!
//! Frontends ask these before rendering edit controls; each endpoint runs
//! the same resolution chain the write guards use and returns the caller's
//! effective role on the owning workspace.

use crate::auth::membership::{ResourceDepth, ResourceRef};
use crate::server::middleware::authenticated_user;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct MemberRoleResponse {
    pub member_role: String,
}

async fn role_at(
    req: &HttpRequest,
    state: &AppState,
    depth: ResourceDepth,
    id: Uuid,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(req)?;
    let role = state
        .resolver
        .effective_role(ResourceRef::new(depth, id), principal.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MemberRoleResponse {
        member_role: role.to_string(),
    })))
}

/// The caller's role in a workspace
pub async fn workspace_role(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    role_at(&req, &state, ResourceDepth::Workspace, path.into_inner()).await
}

/// The caller's role on the workspace owning a project
pub async fn project_role(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    role_at(&req, &state, ResourceDepth::Project, path.into_inner()).await
}

/// The caller's role on the workspace owning a task
pub async fn task_role(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    role_at(&req, &state, ResourceDepth::Task, path.into_inner()).await
}

/// Mount the member-role lookup routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("/w/{workspaceId}", web::get().to(workspace_role))
            .route("/p/{projectId}", web::get().to(project_role))
            .route("/t/{taskId}", web::get().to(task_role)),
    );
}
