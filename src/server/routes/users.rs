//! User account endpoints

use crate::auth::roles::SystemRole;
use crate::auth::{RegisterUser, TokenPair};
use crate::server::middleware::{RequireSystemRole, authenticated_user};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::database::entities::user;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: user::Model,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Register a new account
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let user = state
        .auth
        .register(RegisterUser {
            username: request.username,
            email: request.email,
            password: request.password,
            full_name: request.full_name,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

/// Log in with username and password
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user, tokens) = state.auth.login(&request.username, &request.password).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(LoginResponse { tokens, user })))
}

/// List all accounts
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.services.users.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

/// Fetch one account
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = state.services.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Update profile fields; own account only, unless SYSADMIN
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let user_id = path.into_inner();

    if principal.id != user_id && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    let user = state
        .services
        .users
        .update_profile(
            user_id,
            request.full_name.as_deref(),
            request.avatar.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Change the account password; own account only
pub async fn change_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let user_id = path.into_inner();

    if principal.id != user_id {
        return Err(ApiError::InsufficientPrivileges);
    }

    state
        .auth
        .change_password(user_id, &request.current_password, &request.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Password changed")))
}

/// Delete an account; own account only, unless SYSADMIN
pub async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let user_id = path.into_inner();

    if principal.id != user_id && principal.system_role != SystemRole::Sysadmin {
        return Err(ApiError::InsufficientPrivileges);
    }

    state.services.users.delete(user_id).await?;
    info!("Account deleted: {}", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Account deleted")))
}

/// Mount the user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .service(
                web::resource("")
                    .wrap(RequireSystemRole::new(SystemRole::Sysadmin))
                    .route(web::get().to(list_users)),
            )
            .route("/{id}/password", web::put().to(change_password))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}
