//! Bookmark endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::{MemberRole, SystemRole};
use crate::server::middleware::{RequireMemberRole, RequireSystemRole, authenticated_user};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, guard, web};
use uuid::Uuid;

/// List every bookmark in the system
pub async fn list_all_bookmarks(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let bookmarks = state.services.bookmarks.list_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookmarks)))
}

/// List a user's bookmarks; own bookmarks only, unless SYSADMIN
pub async fn list_user_bookmarks(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let user_id = path.into_inner();

    if principal.id != user_id && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    let bookmarks = state.services.bookmarks.list_by_user(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookmarks)))
}

/// List bookmarks on a task
pub async fn list_task_bookmarks(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bookmarks = state.services.bookmarks.list_by_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookmarks)))
}

/// Fetch one bookmark
pub async fn get_bookmark(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bookmark = state.services.bookmarks.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookmark)))
}

/// Fetch a user's bookmark on a task
pub async fn find_bookmark(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, task_id) = path.into_inner();
    let bookmark = state.services.bookmarks.find(user_id, task_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookmark)))
}

/// Bookmark a task; only for oneself, unless SYSADMIN
pub async fn create_bookmark(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let (user_id, task_id) = path.into_inner();

    if principal.id != user_id && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    let bookmark = state.services.bookmarks.create(user_id, task_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(bookmark)))
}

/// Delete a bookmark; own bookmarks only, unless SYSADMIN
pub async fn delete_bookmark(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let bookmark_id = path.into_inner();

    let bookmark = state.services.bookmarks.get(bookmark_id).await?;
    if principal.id != bookmark.user_id && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    state.services.bookmarks.delete(bookmark_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Bookmark deleted")))
}

/// Mount the bookmark routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookmarks")
            .service(
                web::resource("")
                    .wrap(RequireSystemRole::new(SystemRole::Sysadmin))
                    .route(web::get().to(list_all_bookmarks)),
            )
            .service(
                web::resource("/u/{userId}/t/{taskId}")
                    .guard(guard::Get())
                    .route(web::get().to(find_bookmark)),
            )
            .service(
                web::resource("/u/{userId}/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Task,
                    ))
                    .route(web::post().to(create_bookmark)),
            )
            .route("/u/{userId}", web::get().to(list_user_bookmarks))
            .service(
                web::resource("/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Task,
                    ))
                    .route(web::get().to(list_task_bookmarks)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_bookmark))
                    .route(web::delete().to(delete_bookmark)),
            ),
    );
}
