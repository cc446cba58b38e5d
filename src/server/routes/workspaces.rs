//! Workspace and workspace-member endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::{MemberRole, SystemRole};
use crate::server::middleware::{RequireMemberRole, authenticated_user};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, guard, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameWorkspaceRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteMemberRequest {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub role: String,
}

/// List the caller's workspaces (all of them for SYSADMIN)
pub async fn list_workspaces(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let unrestricted = principal.system_role == SystemRole::Sysadmin;
    let workspaces = state
        .services
        .workspaces
        .list(principal.id, unrestricted)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(workspaces)))
}

/// Check whether a workspace title is still available to the caller
pub async fn check_title(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<TitleQuery>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let available = state
        .services
        .workspaces
        .is_title_available(principal.id, &query.title)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({ "available": available }),
    )))
}

/// Fetch one workspace
pub async fn get_workspace(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let workspace = state.services.workspaces.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(workspace)))
}

/// Create a workspace owned by the caller
pub async fn create_workspace(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateWorkspaceRequest>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let workspace = state
        .services
        .workspaces
        .create(principal.id, &request.title)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(workspace)))
}

/// Rename a workspace
pub async fn rename_workspace(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<RenameWorkspaceRequest>,
) -> Result<HttpResponse, ApiError> {
    let workspace = state
        .services
        .workspaces
        .rename(path.into_inner(), &request.title)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(workspace)))
}

/// Delete a workspace
pub async fn delete_workspace(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.services.workspaces.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Workspace deleted")))
}

/// List workspace members
pub async fn list_members(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let members = state.services.workspaces.members(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(members)))
}

/// Fetch one membership
pub async fn get_member(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (workspace_id, member_id) = path.into_inner();
    let member = state
        .services
        .workspaces
        .member(workspace_id, member_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(member)))
}

/// Invite a user by username
pub async fn invite_member(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<InviteMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = state
        .services
        .workspaces
        .invite(path.into_inner(), &request.username, &request.role)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(member)))
}

/// Change a member's role
pub async fn update_member(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let (workspace_id, member_id) = path.into_inner();
    let member = state
        .services
        .workspaces
        .update_member_role(workspace_id, principal.id, member_id, &request.role)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(member)))
}

/// Remove a member
pub async fn remove_member(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let (workspace_id, member_id) = path.into_inner();
    state
        .services
        .workspaces
        .remove_member(workspace_id, principal.id, member_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Member removed")))
}

/// Mount the workspace routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/workspaces")
            .route("/check", web::get().to(check_title))
            .service(
                web::resource("")
                    .route(web::get().to(list_workspaces))
                    .route(web::post().to(create_workspace)),
            )
            .service(
                web::resource("/{id}/members/{memberId}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::get().to(get_member)),
            )
            .service(
                web::resource("/{id}/members/{memberId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Admin,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::put().to(update_member))
                    .route(web::delete().to(remove_member)),
            )
            .service(
                web::resource("/{id}/members")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::get().to(list_members)),
            )
            .service(
                web::resource("/{id}/members")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Admin,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::post().to(invite_member)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::get().to(get_workspace)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Admin,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::put().to(rename_workspace))
                    .route(web::delete().to(delete_workspace)),
            ),
    );
}
