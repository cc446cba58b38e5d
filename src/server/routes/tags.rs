//! Tag endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::{MemberRole, SystemRole};
use crate::server::middleware::{RequireMemberRole, RequireSystemRole};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, guard, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub title: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub title: Option<String>,
    pub color: Option<String>,
}

/// List every tag in the system
pub async fn list_all_tags(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let tags = state.services.tags.list_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tags)))
}

/// List tags in a project
pub async fn list_project_tags(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tags = state.services.tags.list_by_project(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tags)))
}

/// List tags assigned to a task
pub async fn list_task_tags(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tags = state.services.tags.list_by_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tags)))
}

/// Fetch one tag
pub async fn get_tag(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tag = state.services.tags.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tag)))
}

/// Create a tag in a project
pub async fn create_tag(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateTagRequest>,
) -> Result<HttpResponse, ApiError> {
    let tag = state
        .services
        .tags
        .create(path.into_inner(), &request.title, &request.color)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(tag)))
}

/// Update tag fields
pub async fn update_tag(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTagRequest>,
) -> Result<HttpResponse, ApiError> {
    let tag = state
        .services
        .tags
        .update(
            path.into_inner(),
            request.title.as_deref(),
            request.color.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tag)))
}

/// Delete a tag
pub async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.services.tags.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tag deleted")))
}

/// Assign a tag to a task
pub async fn assign_tag(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (tag_id, task_id) = path.into_inner();
    state.services.tags.assign(tag_id, task_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Tag assigned")))
}

/// Remove a tag assignment from a task
pub async fn unassign_tag(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (tag_id, task_id) = path.into_inner();
    state.services.tags.unassign(tag_id, task_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tag unassigned")))
}

/// Mount the tag routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tags")
            .service(
                web::resource("")
                    .wrap(RequireSystemRole::new(SystemRole::Sysadmin))
                    .route(web::get().to(list_all_tags)),
            )
            .service(
                web::resource("/p/{projectId}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Project,
                    ))
                    .route(web::get().to(list_project_tags)),
            )
            .service(
                web::resource("/p/{projectId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Project,
                    ))
                    .route(web::post().to(create_tag)),
            )
            .service(
                web::resource("/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Task,
                    ))
                    .route(web::get().to(list_task_tags)),
            )
            .service(
                web::resource("/{id}/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Tag,
                    ))
                    .route(web::post().to(assign_tag))
                    .route(web::delete().to(unassign_tag)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Tag,
                    ))
                    .route(web::get().to(get_tag)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Tag,
                    ))
                    .route(web::put().to(update_tag))
                    .route(web::delete().to(delete_tag)),
            ),
    );
}
