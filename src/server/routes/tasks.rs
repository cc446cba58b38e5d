//! Task endpoints

use crate::auth::membership::ResourceDepth;
use crate::auth::roles::MemberRole;
use crate::server::middleware::RequireMemberRole;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::database::TaskUpdate;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, guard, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub assignees: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    /// Absent = keep, explicit null = clear
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub timer: Option<i64>,
    pub assignees: Option<Vec<Uuid>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// List tasks in a project
pub async fn list_tasks(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tasks = state.services.tasks.list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tasks)))
}

/// Fetch one task
pub async fn get_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let task = state.services.tasks.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(task)))
}

/// Create a task in a project
pub async fn create_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let task = state
        .services
        .tasks
        .create(
            path.into_inner(),
            &request.title,
            request.description.as_deref(),
            request.status.as_deref(),
            request.due_date,
            request.assignees,
        )
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(task)))
}

/// Apply a partial update to a task
pub async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let changes = TaskUpdate {
        title: request.title,
        description: request.description,
        status: request.status,
        due_date: request.due_date,
        timer: request.timer,
        assignees: request.assignees.map(|a| serde_json::json!(a)),
    };

    let task = state.services.tasks.update(path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(task)))
}

/// Delete a task
pub async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.services.tasks.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Task deleted")))
}

/// Mount the task routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .service(
                web::resource("/p/{projectId}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Project,
                    ))
                    .route(web::get().to(list_tasks)),
            )
            .service(
                web::resource("/p/{projectId}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Project,
                    ))
                    .route(web::post().to(create_task)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .wrap(RequireMemberRole::new(
                        MemberRole::Reader,
                        ResourceDepth::Task,
                    ))
                    .route(web::get().to(get_task)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireMemberRole::new(
                        MemberRole::Collaborator,
                        ResourceDepth::Task,
                    ))
                    .route(web::put().to(update_task))
                    .route(web::delete().to(delete_task)),
            ),
    );
}
