//! Role guards
//!
//! Scope-level middleware enforcing the two authorization models: the
//! coarse system-role check and the workspace membership check backed by
//! the resolver. Both expect [`AuthMiddleware`](super::AuthMiddleware) to
//! have attached the principal already.

use crate::auth::membership::{ResourceDepth, ResourceRef};
use crate::auth::roles::{MemberRole, SystemRole};
use crate::server::middleware::auth::AuthenticatedUser;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures_util::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use uuid::Uuid;

/// Guard requiring a system role on the authenticated user
pub struct RequireSystemRole {
    required: SystemRole,
}

impl RequireSystemRole {
    pub fn new(required: SystemRole) -> Self {
        Self { required }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSystemRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireSystemRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSystemRoleService {
            service,
            required: self.required,
        }))
    }
}

pub struct RequireSystemRoleService<S> {
    service: S,
    required: SystemRole,
}

impl<S, B> Service<ServiceRequest> for RequireSystemRoleService<S>
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
        let user = req.extensions().get::<AuthenticatedUser>().copied();

        let allowed = match user {
            Some(user) => {
                user.system_role == SystemRole::Sysadmin || self.required == SystemRole::User
            }
            None => return Box::pin(ready(Err(ApiError::Unauthenticated.into()))),
        };

        if !allowed {
            return Box::pin(ready(Err(ApiError::InsufficientPrivileges.into())));
        }

        Box::pin(self.service.call(req))
    }
}

/// Guard requiring a workspace membership role on the targeted resource
///
/// Reads the resource id from the route's path parameters, builds the typed
/// reference for the configured depth, and asks the resolver whether the
/// principal's effective role meets the requirement.
pub struct RequireMemberRole {
    required: MemberRole,
    depth: ResourceDepth,
}

impl RequireMemberRole {
    pub fn new(required: MemberRole, depth: ResourceDepth) -> Self {
        Self { required, depth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireMemberRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireMemberRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireMemberRoleService {
            service: Rc::new(service),
            required: self.required,
            depth: self.depth,
        }))
    }
}

pub struct RequireMemberRoleService<S> {
    service: Rc<S>,
    required: MemberRole,
    depth: ResourceDepth,
}

impl<S, B> Service<ServiceRequest> for RequireMemberRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;
        let depth = self.depth;

        Box::pin(async move {
            let user = req
                .extensions()
                .get::<AuthenticatedUser>()
                .copied()
                .ok_or(ApiError::Unauthenticated)?;

            let id = resource_id(&req, depth)?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| ApiError::internal("Application state missing"))?;

            state
                .resolver
                .authorize(required, ResourceRef::new(depth, id), user.id, user.system_role)
                .await?;

            service.call(req).await
        })
    }
}

/// Path parameter names carrying the resource id, per depth
///
/// Routes either name the parameter after the resource or just `id` when
/// the resource is the route's subject.
fn param_aliases(depth: ResourceDepth) -> [&'static str; 2] {
    match depth {
        ResourceDepth::Workspace => ["workspaceId", "id"],
        ResourceDepth::Project => ["projectId", "id"],
        ResourceDepth::Task => ["taskId", "id"],
        ResourceDepth::Tag => ["tagId", "id"],
        ResourceDepth::Comment => ["commentId", "id"],
    }
}

fn resource_id(req: &ServiceRequest, depth: ResourceDepth) -> Result<Uuid, ApiError> {
    let raw = param_aliases(depth)
        .into_iter()
        .find_map(|name| req.match_info().get(name))
        .ok_or_else(|| ApiError::validation("Missing resource identifier"))?;

    raw.parse()
        .map_err(|_| ApiError::validation("Invalid resource identifier"))
}
