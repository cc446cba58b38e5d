//! Cross-resource search endpoint

use crate::auth::roles::SystemRole;
use crate::server::middleware::authenticated_user;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Search workspaces, projects, tasks and users by title
///
/// Results are filtered to the caller's workspace memberships; SYSADMIN
/// searches everything.
pub async fn search(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let principal = authenticated_user(&req)?;
    let unrestricted = principal.system_role == SystemRole::Sysadmin;

    let results = state
        .services
        .search
        .search(principal.id, &query.q, unrestricted)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(results)))
}

/// Mount the search route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/search").route("", web::get().to(search)));
}
