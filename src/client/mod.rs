//! GitHub REST API client

use async_trait::async_trait;

use crate::error::Result;

pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use github::GitHubClient;
#[cfg(test)]
pub use mock::MockGitHubClient;
pub use models::{Branch, CommitRef, Organization, Repository};
pub use pagination::{CommitFilterParams, MAX_PAGE_SIZE, PaginationParams};

/// GitHub API operations used by the report.
///
/// List methods return a single page; callers walk pages with
/// [`pagination::walk_pages`]. A non-success status is an `ApiError`, never
/// an empty page.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// List one page of organizations the authenticated user belongs to
    async fn list_orgs(&self, pagination: &PaginationParams) -> Result<Vec<Organization>>;

    /// List one page of repositories for an organization
    async fn list_repos(
        &self,
        org: &str,
        pagination: &PaginationParams,
    ) -> Result<Vec<Repository>>;

    /// List branches of a repository.
    ///
    /// Single request without pagination parameters, so only the endpoint's
    /// default page of branches is returned.
    async fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<Branch>>;

    /// List one page of commits reachable from a branch within a date range
    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        filter: &CommitFilterParams<'_>,
        pagination: &PaginationParams,
    ) -> Result<Vec<CommitRef>>;
}
