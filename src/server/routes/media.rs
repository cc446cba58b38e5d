//! Media upload and download endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::{MemberRole, SystemRole};
use crate::server::middleware::{RequireMemberRole, authenticated_user};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use uuid::Uuid;

/// Drain one multipart payload into (filename, bytes)
///
/// Only the first `file` field is kept; everything else is skipped.
async fn read_upload(mut payload: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    let mut file_name: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| ApiError::validation(format!("Invalid multipart data: {e}")))?;

        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name == "file" && content.is_none() {
            if let Some(cd) = field.content_disposition() {
                if let Some(fname) = cd.get_filename() {
                    file_name = Some(fname.to_string());
                }
            }

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let bytes = chunk
                    .map_err(|e| ApiError::validation(format!("Error reading upload: {e}")))?;
                data.extend_from_slice(&bytes);
            }
            content = Some(data);
        } else {
            while field.next().await.is_some() {}
        }
    }

    match content {
        Some(data) if !data.is_empty() => {
            Ok((file_name.unwrap_or_else(|| "upload.bin".to_string()), data))
        }
        _ => Err(ApiError::validation("No file provided")),
    }
}

/// Upload a file without attaching it to a task
pub async fn upload_media(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let (file_name, content) = read_upload(payload).await?;

    let media = state
        .services
        .media
        .upload(principal.id, &file_name, &content, None)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(media)))
}

/// Upload a file attached to a task
pub async fn upload_task_media(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let (file_name, content) = read_upload(payload).await?;

    let media = state
        .services
        .media
        .upload(principal.id, &file_name, &content, Some(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(media)))
}

/// Fetch one media record
pub async fn get_media(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let media = state.services.media.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(media)))
}

/// Stream a stored file back to the client
pub async fn download_media(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let (media, content) = state.services.media.content(path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(media.content_type)
        .body(content))
}

/// List media attached to a task
pub async fn list_task_media(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let media = state.services.media.list_by_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(media)))
}

/// Delete a media record and its file; uploader only, unless SYSADMIN
pub async fn delete_media(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let media_id = path.into_inner();

    let media = state.services.media.get(media_id).await?;
    if principal.id != media.uploaded_by && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    state.services.media.delete(media_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Media deleted")))
}

/// Mount the media routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/media")
            .route("/upload", web::post().to(upload_media))
            .service(
                web::resource("/upload/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Task,
                    ))
                    .route(web::post().to(upload_task_media)),
            )
            .service(
                web::resource("/t/{taskId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Task,
                    ))
                    .route(web::get().to(list_task_media)),
            )
            .route("/{id}/content", web::get().to(download_media))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_media))
                    .route(web::delete().to(delete_media)),
            ),
    );
}
