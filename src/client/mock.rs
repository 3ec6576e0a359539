//! Mock GitHub API client for testing
//!
//! Serves canned pages keyed by organization, repository and branch so the
//! enumerators and the report can be exercised without a network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    Branch, CommitFilterParams, CommitRef, GitHubApi, Organization, PaginationParams, Repository,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Pages are 1-based: `pages[0]` answers `page=1`. A page past the end of the
/// configured list is empty.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new()
///     .with_org_pages(vec![vec![Organization::new("TFE-Infra")]])
///     .await;
///
/// let orgs = mock.list_orgs(&PaginationParams::new()).await?;
/// assert_eq!(orgs.len(), 1);
/// ```
#[derive(Default)]
pub struct MockGitHubClient {
    /// Pages returned from list_orgs
    org_pages: Arc<Mutex<Vec<Vec<Organization>>>>,
    /// Pages returned from list_repos, by org
    repo_pages: Arc<Mutex<HashMap<String, Vec<Vec<Repository>>>>>,
    /// Branches returned from list_branches, by "org/repo"
    branches: Arc<Mutex<HashMap<String, Vec<Branch>>>>,
    /// Pages returned from list_commits, by "org/repo@branch"
    commit_pages: Arc<Mutex<HashMap<String, Vec<Vec<CommitRef>>>>>,
    /// One-shot failures keyed by request, consumed on first match
    failures: Arc<Mutex<HashMap<RequestKey, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_orgs: usize,
    pub list_repos: usize,
    pub list_branches: usize,
    pub list_commits: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_orgs + self.list_repos + self.list_branches + self.list_commits
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_repos")
    pub method: &'static str,
    /// What the request was about: "", "org", "org/repo" or "org/repo@branch"
    pub target: String,
    /// Page number for paginated requests
    pub page: Option<usize>,
    /// `since`/`until` for commit requests
    pub range: Option<(String, String)>,
}

type RequestKey = (&'static str, String, Option<usize>);

fn repo_key(org: &str, repo: &str) -> String {
    format!("{org}/{repo}")
}

fn branch_key(org: &str, repo: &str, branch: &str) -> String {
    format!("{org}/{repo}@{branch}")
}

fn page_of<T: Clone>(pages: Option<&Vec<Vec<T>>>, page: usize) -> Vec<T> {
    pages
        .and_then(|p| p.get(page.saturating_sub(1)))
        .cloned()
        .unwrap_or_default()
}

impl MockGitHubClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure pages returned from list_orgs.
    pub async fn with_org_pages(self, pages: Vec<Vec<Organization>>) -> Self {
        *self.org_pages.lock().await = pages;
        self
    }

    /// Configure pages returned from list_repos for one organization.
    pub async fn with_repo_pages(self, org: &str, pages: Vec<Vec<Repository>>) -> Self {
        self.repo_pages.lock().await.insert(org.to_string(), pages);
        self
    }

    /// Configure branches returned from list_branches for one repository.
    pub async fn with_branches(self, org: &str, repo: &str, branches: Vec<Branch>) -> Self {
        self.branches
            .lock()
            .await
            .insert(repo_key(org, repo), branches);
        self
    }

    /// Configure commit pages for one branch, given as page lengths.
    pub async fn with_commit_pages(
        self,
        org: &str,
        repo: &str,
        branch: &str,
        page_sizes: &[usize],
    ) -> Self {
        let pages = page_sizes
            .iter()
            .enumerate()
            .map(|(p, &n)| {
                (0..n)
                    .map(|i| CommitRef::new(format!("{branch}-{p}-{i}")))
                    .collect()
            })
            .collect();
        self.commit_pages
            .lock()
            .await
            .insert(branch_key(org, repo, branch), pages);
        self
    }

    /// Fail the next list_orgs call for `page`.
    pub async fn fail_orgs_page(self, page: usize, error: ApiError) -> Self {
        self.failures
            .lock()
            .await
            .insert(("list_orgs", String::new(), Some(page)), error);
        self
    }

    /// Fail the next list_repos call for `org` and `page`.
    pub async fn fail_repos_page(self, org: &str, page: usize, error: ApiError) -> Self {
        self.failures
            .lock()
            .await
            .insert(("list_repos", org.to_string(), Some(page)), error);
        self
    }

    /// Fail the next list_branches call for a repository.
    pub async fn fail_branches(self, org: &str, repo: &str, error: ApiError) -> Self {
        self.failures
            .lock()
            .await
            .insert(("list_branches", repo_key(org, repo), None), error);
        self
    }

    /// Fail the next list_commits call for a branch and `page`.
    pub async fn fail_commits_page(
        self,
        org: &str,
        repo: &str,
        branch: &str,
        page: usize,
        error: ApiError,
    ) -> Self {
        self.failures.lock().await.insert(
            ("list_commits", branch_key(org, repo, branch), Some(page)),
            error,
        );
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Record the request and return its configured failure, if any.
    async fn record(&self, request: CapturedRequest) -> Result<()> {
        let key = (request.method, request.target.clone(), request.page);
        self.captured_requests.lock().await.push(request);

        match self.failures.lock().await.remove(&key) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn list_orgs(&self, pagination: &PaginationParams) -> Result<Vec<Organization>> {
        self.call_count.lock().await.list_orgs += 1;
        self.record(CapturedRequest {
            method: "list_orgs",
            target: String::new(),
            page: Some(pagination.page),
            range: None,
        })
        .await?;

        Ok(page_of(Some(&*self.org_pages.lock().await), pagination.page))
    }

    async fn list_repos(
        &self,
        org: &str,
        pagination: &PaginationParams,
    ) -> Result<Vec<Repository>> {
        self.call_count.lock().await.list_repos += 1;
        self.record(CapturedRequest {
            method: "list_repos",
            target: org.to_string(),
            page: Some(pagination.page),
            range: None,
        })
        .await?;

        Ok(page_of(self.repo_pages.lock().await.get(org), pagination.page))
    }

    async fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<Branch>> {
        self.call_count.lock().await.list_branches += 1;
        let key = repo_key(org, repo);
        self.record(CapturedRequest {
            method: "list_branches",
            target: key.clone(),
            page: None,
            range: None,
        })
        .await?;

        Ok(self
            .branches
            .lock()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        filter: &CommitFilterParams<'_>,
        pagination: &PaginationParams,
    ) -> Result<Vec<CommitRef>> {
        self.call_count.lock().await.list_commits += 1;
        let key = branch_key(org, repo, filter.sha);
        self.record(CapturedRequest {
            method: "list_commits",
            target: key.clone(),
            page: Some(pagination.page),
            range: Some((filter.range.since_param(), filter.range.until_param())),
        })
        .await?;

        Ok(page_of(self.commit_pages.lock().await.get(&key), pagination.page))
    }
}
