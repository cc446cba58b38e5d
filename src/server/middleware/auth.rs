//! Authentication middleware
//!
//! Verifies the Bearer token on every non-public route and attaches the
//! authenticated principal to the request extensions for handlers and
//! guards further down the chain.

use crate::auth::roles::SystemRole;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};
use uuid::Uuid;

/// The authenticated principal of a request
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub system_role: SystemRole,
}

/// Routes that do not require a token
fn is_public_route(path: &str) -> bool {
    matches!(
        path,
        "/health"
            | "/api/health"
            | "/api/users/register"
            | "/api/users/login"
            | "/api/auth/forgot-password"
            | "/api/auth/reset-password"
            | "/api/auth/refresh"
    )
}

/// Read the authenticated principal a handler's request carries
pub fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or(ApiError::Unauthenticated)
}

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let token = bearer_token(&req);
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        let claims = match (token, app_state) {
            (Some(token), Some(state)) => match state.auth.jwt().verify_access_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    return Box::pin(ready(Err(ApiError::Unauthenticated.into())));
                }
            },
            _ => {
                debug!("No bearer token on protected route: {}", req.path());
                return Box::pin(ready(Err(ApiError::Unauthenticated.into())));
            }
        };

        req.extensions_mut().insert(AuthenticatedUser {
            id: claims.sub,
            system_role: claims.role,
        });

        Box::pin(self.service.call(req))
    }
}

/// Pull the token out of the Authorization header
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}
