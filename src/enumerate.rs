//! Organization, repository and branch enumeration plus commit counting
//!
//! Each function makes its own requests through a [`GitHubApi`]. A request
//! failure that ends pagination is returned alongside whatever was collected
//! before it, so callers decide how loudly to report it.

use std::collections::HashSet;

use log::debug;

use crate::client::pagination::walk_pages;
use crate::client::{Branch, CommitFilterParams, GitHubApi, MAX_PAGE_SIZE, Repository};
use crate::config::DateRange;
use crate::error::{ApiError, Error, Result};

/// A value fetched from the API, possibly cut short by a failed request.
#[derive(Debug)]
pub struct Fetched<T> {
    pub value: T,
    /// The failure that stopped fetching early, if any
    pub failure: Option<ApiError>,
}

impl<T> Fetched<T> {
    fn complete(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }
}

/// Logins of the caller's organizations that start with `prefix`, in the
/// order the API first lists them. A login repeated on a later page (the
/// listing shifted between requests) is reported once.
pub async fn list_orgs<A>(client: &A, prefix: &str) -> Result<Fetched<Vec<String>>>
where
    A: GitHubApi + ?Sized,
{
    let mut logins = Vec::new();
    let mut seen = HashSet::new();

    let walk = walk_pages(
        MAX_PAGE_SIZE,
        move |params| async move { client.list_orgs(&params).await },
        |page| {
            logins.extend(
                page.into_iter()
                    .map(|org| org.login)
                    .filter(|login| login.starts_with(prefix))
                    .filter(|login| seen.insert(login.clone())),
            )
        },
    )
    .await?;

    debug!(
        "Matched {} of {} organizations with prefix {:?}",
        logins.len(),
        walk.items,
        prefix
    );

    Ok(Fetched {
        value: logins,
        failure: walk.into_failure(),
    })
}

/// All repositories of an organization.
pub async fn list_repos<A>(client: &A, org: &str) -> Result<Fetched<Vec<Repository>>>
where
    A: GitHubApi + ?Sized,
{
    let mut repos = Vec::new();

    let walk = walk_pages(
        MAX_PAGE_SIZE,
        move |params| async move { client.list_repos(org, &params).await },
        |page| repos.extend(page),
    )
    .await?;

    debug!("Fetched {} repositories for {}", repos.len(), org);

    Ok(Fetched {
        value: repos,
        failure: walk.into_failure(),
    })
}

/// Branches of a repository, from a single unpaginated request.
pub async fn list_branches<A>(client: &A, org: &str, repo: &str) -> Result<Fetched<Vec<Branch>>>
where
    A: GitHubApi + ?Sized,
{
    match client.list_branches(org, repo).await {
        Ok(branches) => {
            debug!("Fetched {} branches for {}/{}", branches.len(), org, repo);
            Ok(Fetched::complete(branches))
        }
        Err(Error::Api(err)) if err.ends_pagination() => Ok(Fetched {
            value: Vec::new(),
            failure: Some(err),
        }),
        Err(err) => Err(err),
    }
}

/// Number of commits on `branch` within `range`, summed over every page.
pub async fn count_commits<A>(
    client: &A,
    org: &str,
    repo: &str,
    branch: &str,
    range: &DateRange,
) -> Result<Fetched<usize>>
where
    A: GitHubApi + ?Sized,
{
    let filter = CommitFilterParams::new(branch, range);
    let filter = &filter;

    let walk = walk_pages(
        MAX_PAGE_SIZE,
        move |params| async move { client.list_commits(org, repo, filter, &params).await },
        |_| {},
    )
    .await?;

    debug!(
        "Counted {} commits on {}/{}@{} over {} pages",
        walk.items, org, repo, branch, walk.pages
    );

    Ok(Fetched {
        value: walk.items,
        failure: walk.into_failure(),
    })
}
