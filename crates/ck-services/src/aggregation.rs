//! Project aggregation
//!
//! Given a signed-in identity, returns the de-duplicated union of owned and
//! member projects, each hydrated with members and tasks. Failure of the
//! top-level load substitutes the fixed sample dataset for the whole result;
//! there is no partial-degradation path.

use std::collections::HashSet;
use std::sync::Arc;

use ck_core::traits::Id;
use ck_db::{ProjectStore, RepositoryResult};
use ck_models::Project;
use tracing::{error, warn};

use crate::sample::sample_projects;

/// Loads and hydrates the project list for an identity
pub struct ProjectLoader<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for ProjectLoader<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ProjectStore + ?Sized> ProjectLoader<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load all projects the identity owns or is a member of. Any error in
    /// the top-level retrieval yields the sample dataset instead.
    pub async fn load_projects(&self, user_id: Id) -> Vec<Project> {
        match self.try_load(user_id).await {
            Ok(projects) => projects,
            Err(e) => {
                error!(%user_id, error = %e, "Error loading projects, substituting sample data");
                sample_projects(user_id)
            }
        }
    }

    async fn try_load(&self, user_id: Id) -> RepositoryResult<Vec<Project>> {
        // Owned projects first; this query failing aborts the whole load.
        let owned = self.store.projects_owned_by(user_id).await?;

        // Membership index errors are logged and treated as "no memberships".
        let member_ids = match self.store.member_project_ids(user_id).await {
            Ok(ids) => ids,
            Err(e) => {
                error!(%user_id, error = %e, "Error loading membership index");
                Vec::new()
            }
        };

        // Skip the id-in-set query entirely when there is nothing to fetch.
        let member_projects = if member_ids.is_empty() {
            Vec::new()
        } else {
            match self.store.projects_by_ids(&member_ids).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!(%user_id, error = %e, "Error loading member project details");
                    Vec::new()
                }
            }
        };

        // De-duplicate by id, first occurrence wins. Owned entries are
        // enumerated first, so the owned copy takes precedence when a project
        // shows up in both lists.
        // TODO: product has not confirmed owned-over-member precedence is
        // intended; a creator usually also appears in the membership rows.
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for row in owned.into_iter().chain(member_projects) {
            if seen.insert(row.id) {
                unique.push(row);
            }
        }

        let mut projects = Vec::with_capacity(unique.len());
        for row in unique {
            projects.push(self.hydrate_row(row).await);
        }

        Ok(projects)
    }

    /// Hydrate a single project by id. `Ok(None)` when it does not exist.
    pub async fn hydrate(&self, project_id: Id) -> RepositoryResult<Option<Project>> {
        let Some(row) = self.store.find_project(project_id).await? else {
            return Ok(None);
        };
        Ok(Some(self.hydrate_row(row).await))
    }

    /// Per-project member/task lookups. Errors here are swallowed and the
    /// missing list rendered empty, matching the top-level policy of logging
    /// rather than failing hydration.
    async fn hydrate_row(&self, row: ck_db::ProjectRow) -> Project {
        let project_id = row.id;

        let members = match self.store.members_of(project_id).await {
            Ok(members) => members,
            Err(e) => {
                warn!(%project_id, error = %e, "Error loading project members");
                Vec::new()
            }
        };

        let tasks = match self.store.tasks_of(project_id).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(%project_id, error = %e, "Error loading project tasks");
                Vec::new()
            }
        };

        row.into_domain(members, tasks)
    }
}
