//! Project endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::MemberRole;
use crate::server::middleware::RequireMemberRole;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, guard, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub statuses: Option<Vec<String>>,
}

fn default_icon() -> String {
    "folder".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub statuses: Option<Vec<String>>,
}

/// List projects in a workspace
pub async fn list_projects(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let projects = state.services.projects.list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(projects)))
}

/// Fetch one project
pub async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let project = state.services.projects.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

/// Create a project in a workspace
pub async fn create_project(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let project = state
        .services
        .projects
        .create(path.into_inner(), &request.title, &request.icon, request.statuses)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(project)))
}

/// Update project fields
pub async fn update_project(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProjectRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let project = state
        .services
        .projects
        .update(
            path.into_inner(),
            request.title.as_deref(),
            request.icon.as_deref(),
            request.statuses,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

/// Delete a project
pub async fn delete_project(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.services.projects.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Project deleted")))
}

/// Mount the project routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("/w/{workspaceId}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::get().to(list_projects)),
            )
            .service(
                web::resource("/w/{workspaceId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Admin,
                        ResourceDepth::Workspace,
                    ))
                    .route(web::post().to(create_project)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Project,
                    ))
                    .route(web::get().to(get_project)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Put())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Project,
                    ))
                    .route(web::put().to(update_project)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Admin,
                        ResourceDepth::Project,
                    ))
                    .route(web::delete().to(delete_project)),
            ),
    );
}
