//! Workspace membership authorization
//!
//! Decides, for a single request, whether the requesting user's effective
//! role on the workspace that owns a target resource meets a required role.
//! Resources may sit several ownership hops away from their workspace
//! (comment -> task -> project -> workspace); the resolver walks the chain
//! one hop at a time and fails with the most specific NotFound kind when a
//! link is missing.
//!
//! The resolver is stateless and read-only. SYSADMIN principals bypass it
//! entirely, before any lookup runs.

use crate::auth::roles::{MemberRole, SystemRole};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// How many ownership hops a resource reference is from a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceDepth {
    /// The reference is the workspace itself (0 hops)
    Workspace,
    /// project -> workspace (1 hop)
    Project,
    /// task -> project -> workspace (2 hops)
    Task,
    /// tag -> project -> workspace (2 hops)
    Tag,
    /// comment -> task -> project -> workspace (3 hops)
    Comment,
}

impl ResourceDepth {
    /// Tag string as used by route declarations
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceDepth::Workspace => "workspace",
            ResourceDepth::Project => "project",
            ResourceDepth::Task => "task",
            ResourceDepth::Tag => "tag",
            ResourceDepth::Comment => "comment",
        }
    }
}

impl FromStr for ResourceDepth {
    type Err = ApiError;

    /// Parse an external depth tag. Anything outside the five recognized
    /// values is rejected here, so the resolver itself never sees an
    /// unknown depth.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "workspace" => Ok(ResourceDepth::Workspace),
            "project" => Ok(ResourceDepth::Project),
            "task" => Ok(ResourceDepth::Task),
            "tag" => Ok(ResourceDepth::Tag),
            "comment" => Ok(ResourceDepth::Comment),
            _ => Err(ApiError::InvalidDepth),
        }
    }
}

/// A typed reference to the resource an authorization check targets
///
/// The HTTP guard normalizes path parameters (whatever their route-specific
/// names) into one of these before invoking the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    Workspace(Uuid),
    Project(Uuid),
    Task(Uuid),
    Tag(Uuid),
    Comment(Uuid),
}

impl ResourceRef {
    /// Build a reference from a depth tag and a raw id
    pub const fn new(depth: ResourceDepth, id: Uuid) -> Self {
        match depth {
            ResourceDepth::Workspace => ResourceRef::Workspace(id),
            ResourceDepth::Project => ResourceRef::Project(id),
            ResourceDepth::Task => ResourceRef::Task(id),
            ResourceDepth::Tag => ResourceRef::Tag(id),
            ResourceDepth::Comment => ResourceRef::Comment(id),
        }
    }

    /// The depth this reference resolves at
    pub const fn depth(self) -> ResourceDepth {
        match self {
            ResourceRef::Workspace(_) => ResourceDepth::Workspace,
            ResourceRef::Project(_) => ResourceDepth::Project,
            ResourceRef::Task(_) => ResourceDepth::Task,
            ResourceRef::Tag(_) => ResourceDepth::Tag,
            ResourceRef::Comment(_) => ResourceDepth::Comment,
        }
    }
}

/// Ownership-edge lookups against the resource graph
///
/// Each method resolves one hop. `None` means the referenced row does not
/// exist (or its ownership link dangles); the resolver translates that into
/// the NotFound kind for the resource the hop started from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceGraph: Send + Sync {
    /// Whether the workspace row exists
    async fn workspace_exists(&self, workspace_id: Uuid) -> Result<bool>;

    /// Workspace owning the project
    async fn project_workspace(&self, project_id: Uuid) -> Result<Option<Uuid>>;

    /// Project owning the task
    async fn task_project(&self, task_id: Uuid) -> Result<Option<Uuid>>;

    /// Project owning the tag
    async fn tag_project(&self, tag_id: Uuid) -> Result<Option<Uuid>>;

    /// Task owning the comment
    async fn comment_task(&self, comment_id: Uuid) -> Result<Option<Uuid>>;
}

/// Membership relation lookups
///
/// At most one role per (workspace, user) pair. The raw stored value is
/// returned unvalidated; the resolver checks it against the recognized
/// roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// The stored role value for `(workspace_id, user_id)`, if any
    async fn role_of(&self, workspace_id: Uuid, user_id: Uuid) -> Result<Option<String>>;
}

/// The authorization resolver
///
/// One instance is shared across all requests; every call is an independent,
/// strictly sequential chain of lookups with no cross-call state.
#[derive(Clone)]
pub struct MembershipResolver {
    graph: Arc<dyn ResourceGraph>,
    memberships: Arc<dyn MembershipStore>,
}

impl MembershipResolver {
    pub fn new(graph: Arc<dyn ResourceGraph>, memberships: Arc<dyn MembershipStore>) -> Self {
        Self { graph, memberships }
    }

    /// Authorize one request
    ///
    /// Succeeds when `sys_role` is SYSADMIN (unconditional bypass, no
    /// lookups), or when the user's membership role on the workspace owning
    /// `resource` satisfies `required`. All failures are terminal for this
    /// call; nothing is retried.
    pub async fn authorize(
        &self,
        required: MemberRole,
        resource: ResourceRef,
        user_id: Uuid,
        sys_role: SystemRole,
    ) -> Result<()> {
        // SYSADMIN does not have to be checked by their member roles
        if sys_role == SystemRole::Sysadmin {
            debug!(%user_id, "sysadmin bypass");
            return Ok(());
        }

        let workspace_id = self.resolve_workspace(resource).await?;

        let member_role = self
            .memberships
            .role_of(workspace_id, user_id)
            .await?
            .ok_or(ApiError::MemberNotFound)?;

        // Reject role values outside the recognized set before comparing
        let member_role = MemberRole::from_str(&member_role)?;

        if !member_role.satisfies(required) {
            debug!(
                %user_id, %workspace_id,
                held = %member_role, required = %required,
                "membership check failed"
            );
            return Err(ApiError::InsufficientPrivileges);
        }

        Ok(())
    }

    /// The user's effective role on the workspace owning `resource`
    ///
    /// Same resolution chain as [`authorize`](Self::authorize) without the
    /// rank comparison; used by the "what is my role here" endpoints.
    pub async fn effective_role(
        &self,
        resource: ResourceRef,
        user_id: Uuid,
    ) -> Result<MemberRole> {
        let workspace_id = self.resolve_workspace(resource).await?;

        let member_role = self
            .memberships
            .role_of(workspace_id, user_id)
            .await?
            .ok_or(ApiError::MemberNotFound)?;

        MemberRole::from_str(&member_role)
    }

    /// Walk the ownership chain from `resource` to its workspace id
    ///
    /// Hops run strictly in order; a missing link fails immediately with the
    /// NotFound kind of the resource whose lookup came up empty.
    async fn resolve_workspace(&self, resource: ResourceRef) -> Result<Uuid> {
        match resource {
            ResourceRef::Workspace(workspace_id) => {
                if !self.graph.workspace_exists(workspace_id).await? {
                    return Err(ApiError::WorkspaceNotFound);
                }
                Ok(workspace_id)
            }
            ResourceRef::Project(project_id) => self.workspace_of_project(project_id).await,
            ResourceRef::Task(task_id) => self.workspace_of_task(task_id).await,
            ResourceRef::Tag(tag_id) => {
                let project_id = self
                    .graph
                    .tag_project(tag_id)
                    .await?
                    .ok_or(ApiError::TagNotFound)?;

                self.workspace_of_project(project_id).await
            }
            ResourceRef::Comment(comment_id) => {
                let task_id = self
                    .graph
                    .comment_task(comment_id)
                    .await?
                    .ok_or(ApiError::CommentNotFound)?;

                self.workspace_of_task(task_id).await
            }
        }
    }

    async fn workspace_of_task(&self, task_id: Uuid) -> Result<Uuid> {
        let project_id = self
            .graph
            .task_project(task_id)
            .await?
            .ok_or(ApiError::TaskNotFound)?;

        self.workspace_of_project(project_id).await
    }

    async fn workspace_of_project(&self, project_id: Uuid) -> Result<Uuid> {
        self.graph
            .project_workspace(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(
        graph: MockResourceGraph,
        memberships: MockMembershipStore,
    ) -> MembershipResolver {
        MembershipResolver::new(Arc::new(graph), Arc::new(memberships))
    }

    fn membership_returning(role: &str, workspace_id: Uuid, user_id: Uuid) -> MockMembershipStore {
        let role = role.to_string();
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_role_of()
            .withf(move |w, u| *w == workspace_id && *u == user_id)
            .returning(move |_, _| Ok(Some(role.clone())));
        memberships
    }

    #[tokio::test]
    async fn test_sysadmin_bypass_skips_all_lookups() {
        // No expectations set: any lookup would panic the mock
        let graph = MockResourceGraph::new();
        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        for required in [
            MemberRole::Reader,
            MemberRole::Collaborator,
            MemberRole::Admin,
        ] {
            let result = resolver
                .authorize(
                    required,
                    ResourceRef::Task(Uuid::new_v4()),
                    Uuid::new_v4(),
                    SystemRole::Sysadmin,
                )
                .await;
            assert!(result.is_ok());
        }
    }

    #[tokio::test]
    async fn test_sysadmin_bypass_with_nonexistent_resource() {
        // The task does not exist anywhere; the bypass still succeeds
        // because it happens before resolution
        let graph = MockResourceGraph::new();
        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Admin,
                ResourceRef::Task(Uuid::new_v4()),
                Uuid::new_v4(),
                SystemRole::Sysadmin,
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_admin_on_workspace_satisfies_collaborator_at_task_depth() {
        let task_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_task_project()
            .withf(move |t| *t == task_id)
            .returning(move |_| Ok(Some(project_id)));
        graph
            .expect_project_workspace()
            .withf(move |p| *p == project_id)
            .returning(move |_| Ok(Some(workspace_id)));

        let memberships = membership_returning("ADMIN", workspace_id, user_id);
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Collaborator,
                ResourceRef::Task(task_id),
                user_id,
                SystemRole::User,
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reader_fails_collaborator_requirement_at_task_depth() {
        let task_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_task_project()
            .returning(move |_| Ok(Some(project_id)));
        graph
            .expect_project_workspace()
            .returning(move |_| Ok(Some(workspace_id)));

        let memberships = membership_returning("READER", workspace_id, user_id);
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Collaborator,
                ResourceRef::Task(task_id),
                user_id,
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::InsufficientPrivileges)));
    }

    #[tokio::test]
    async fn test_missing_project_stops_before_membership_lookup() {
        let project_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_project_workspace()
            .withf(move |p| *p == project_id)
            .times(1)
            .returning(|_| Ok(None));

        // Membership store has no expectations: querying it would panic
        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Reader,
                ResourceRef::Project(project_id),
                Uuid::new_v4(),
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::ProjectNotFound)));
    }

    #[tokio::test]
    async fn test_equal_rank_satisfies_at_comment_depth() {
        let comment_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_comment_task()
            .withf(move |c| *c == comment_id)
            .returning(move |_| Ok(Some(task_id)));
        graph
            .expect_task_project()
            .withf(move |t| *t == task_id)
            .returning(move |_| Ok(Some(project_id)));
        graph
            .expect_project_workspace()
            .withf(move |p| *p == project_id)
            .returning(move |_| Ok(Some(workspace_id)));

        let memberships = membership_returning("COLLABORATOR", workspace_id, user_id);
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Collaborator,
                ResourceRef::Comment(comment_id),
                user_id,
                SystemRole::User,
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_membership_never_defaults_to_reader() {
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_workspace_exists()
            .withf(move |w| *w == workspace_id)
            .returning(|_| Ok(true));

        let mut memberships = MockMembershipStore::new();
        memberships.expect_role_of().returning(|_, _| Ok(None));

        let resolver = resolver(graph, memberships);

        // Even the lowest requirement fails without a membership row
        let result = resolver
            .authorize(
                MemberRole::Reader,
                ResourceRef::Workspace(workspace_id),
                user_id,
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::MemberNotFound)));
    }

    #[tokio::test]
    async fn test_unrecognized_stored_role_is_rejected() {
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph.expect_workspace_exists().returning(|_| Ok(true));

        let memberships = membership_returning("OWNER", workspace_id, user_id);
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Reader,
                ResourceRef::Workspace(workspace_id),
                user_id,
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidMemberRole)));
    }

    #[tokio::test]
    async fn test_missing_workspace_at_workspace_depth() {
        let mut graph = MockResourceGraph::new();
        graph.expect_workspace_exists().returning(|_| Ok(false));

        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Reader,
                ResourceRef::Workspace(Uuid::new_v4()),
                Uuid::new_v4(),
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::WorkspaceNotFound)));
    }

    #[tokio::test]
    async fn test_missing_task_at_comment_depth_surfaces_task_not_found() {
        let comment_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_comment_task()
            .returning(move |_| Ok(Some(task_id)));
        graph.expect_task_project().times(1).returning(|_| Ok(None));

        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Reader,
                ResourceRef::Comment(comment_id),
                Uuid::new_v4(),
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::TaskNotFound)));
    }

    #[tokio::test]
    async fn test_missing_tag_surfaces_tag_not_found() {
        let mut graph = MockResourceGraph::new();
        graph.expect_tag_project().returning(|_| Ok(None));

        let memberships = MockMembershipStore::new();
        let resolver = resolver(graph, memberships);

        let result = resolver
            .authorize(
                MemberRole::Collaborator,
                ResourceRef::Tag(Uuid::new_v4()),
                Uuid::new_v4(),
                SystemRole::User,
            )
            .await;
        assert!(matches!(result, Err(ApiError::TagNotFound)));
    }

    #[tokio::test]
    async fn test_depth_resolution_is_deterministic() {
        let task_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_task_project()
            .times(2)
            .returning(move |_| Ok(Some(project_id)));
        graph
            .expect_project_workspace()
            .times(2)
            .returning(move |_| Ok(Some(workspace_id)));

        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_role_of()
            .withf(move |w, u| *w == workspace_id && *u == user_id)
            .times(2)
            .returning(|_, _| Ok(Some("READER".to_string())));

        let resolver = resolver(graph, memberships);

        // Same reference, same depth, same answer both times
        for _ in 0..2 {
            let result = resolver
                .authorize(
                    MemberRole::Reader,
                    ResourceRef::Task(task_id),
                    user_id,
                    SystemRole::User,
                )
                .await;
            assert!(result.is_ok());
        }
    }

    #[tokio::test]
    async fn test_effective_role_resolves_through_project() {
        let project_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut graph = MockResourceGraph::new();
        graph
            .expect_project_workspace()
            .returning(move |_| Ok(Some(workspace_id)));

        let memberships = membership_returning("COLLABORATOR", workspace_id, user_id);
        let resolver = resolver(graph, memberships);

        let role = resolver
            .effective_role(ResourceRef::Project(project_id), user_id)
            .await
            .unwrap();
        assert_eq!(role, MemberRole::Collaborator);
    }

    #[test]
    fn test_unknown_depth_tag_is_rejected_at_parse() {
        assert!(matches!(
            "organization".parse::<ResourceDepth>(),
            Err(ApiError::InvalidDepth)
        ));
        assert!(matches!(
            "".parse::<ResourceDepth>(),
            Err(ApiError::InvalidDepth)
        ));
        assert!(matches!(
            "Workspace".parse::<ResourceDepth>(),
            Err(ApiError::InvalidDepth)
        ));
    }

    #[test]
    fn test_depth_tag_roundtrip() {
        for depth in [
            ResourceDepth::Workspace,
            ResourceDepth::Project,
            ResourceDepth::Task,
            ResourceDepth::Tag,
            ResourceDepth::Comment,
        ] {
            assert_eq!(depth.as_str().parse::<ResourceDepth>().unwrap(), depth);
        }
    }

    #[test]
    fn test_resource_ref_depth() {
        let id = Uuid::new_v4();
        assert_eq!(
            ResourceRef::new(ResourceDepth::Comment, id),
            ResourceRef::Comment(id)
        );
        assert_eq!(ResourceRef::Tag(id).depth(), ResourceDepth::Tag);
    }
}
