//! Comment endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::MemberRole;
use crate::server::middleware::{RequireMemberRole, authenticated_user};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, guard, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub mentions: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
    pub mentions: Option<Vec<Uuid>>,
}

/// List comments on a task
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let comments = state.services.comments.list_by_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(comments)))
}

/// Fetch one comment
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let comment = state.services.comments.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(comment)))
}

/// Post a comment on a task, authored by the caller
pub async fn create_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let request = request.into_inner();
    let comment = state
        .services
        .comments
        .create(
            path.into_inner(),
            principal.id,
            &request.content,
            request.mentions,
        )
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(comment)))
}

/// Edit a comment
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let comment = state
        .services
        .comments
        .update(path.into_inner(), request.content.as_deref(), request.mentions)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(comment)))
}

/// Delete a comment
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.services.comments.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Comment deleted")))
}

/// Mount the comment routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .service(
                web::resource("/t/{taskId}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Task,
                    ))
                    .route(web::get().to(list_comments)),
            )
            .service(
                web::resource("/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Task,
                    ))
                    .route(web::post().to(create_comment)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Comment,
                    ))
                    .route(web::get().to(get_comment)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Comment,
                    ))
                    .route(web::put().to(update_comment))
                    .route(web::delete().to(delete_comment)),
            ),
    );
}
