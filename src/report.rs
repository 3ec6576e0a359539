//! Consolidated commit report
//!
//! Walks organizations, then their repositories, then each repository's
//! branches, counting commits per branch. Requests are strictly sequential
//! and every row is written as soon as its count is known.

use std::io::Write;

use indicatif::ProgressBar;
use log::{info, warn};

use crate::client::GitHubApi;
use crate::config::DateRange;
use crate::enumerate::{self, Fetched};
use crate::error::Result;
use crate::output::MarkdownWriter;

/// Counts gathered while generating a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub organizations: usize,
    pub repositories: usize,
    pub branches: usize,
    pub commits: usize,
    /// Enumeration calls that stopped early on a failed request
    pub failed_requests: usize,
}

impl ReportSummary {
    /// Log the failure that cut a fetch short, if any, and return the value.
    fn take<T>(&mut self, fetched: Fetched<T>, what: impl FnOnce() -> String) -> T {
        if let Some(err) = fetched.failure {
            self.failed_requests += 1;
            warn!("{} stopped early: {}", what(), err);
        }
        fetched.value
    }
}

/// Generate the report into `out`.
///
/// Only organizations whose login starts with `org_prefix` get a section.
/// Request failures end the affected listing and are logged; any other error
/// aborts generation, leaving `out` with whatever was already written.
pub async fn generate<A, W>(
    client: &A,
    range: &DateRange,
    org_prefix: &str,
    out: W,
    progress: &ProgressBar,
) -> Result<(ReportSummary, W)>
where
    A: GitHubApi + ?Sized,
    W: Write,
{
    let mut summary = ReportSummary::default();
    let mut writer = MarkdownWriter::new(out);

    writer.header(range)?;

    progress.set_message("Listing organizations");
    let orgs = enumerate::list_orgs(client, org_prefix).await?;
    let orgs = summary.take(orgs, || "Listing organizations".to_string());

    for org in &orgs {
        summary.organizations += 1;
        writer.org_heading(org)?;

        progress.set_message(format!("{org}: listing repositories"));
        let repos = enumerate::list_repos(client, org).await?;
        let repos = summary.take(repos, || format!("Listing repositories of {org}"));

        let mut org_total = 0;
        for repo in &repos {
            summary.repositories += 1;
            let repo_name = repo.name.as_str();

            progress.set_message(format!("{org}/{repo_name}"));
            let branches = enumerate::list_branches(client, org, repo_name).await?;
            let branches =
                summary.take(branches, || format!("Listing branches of {org}/{repo_name}"));

            for branch in &branches {
                summary.branches += 1;
                let counted =
                    enumerate::count_commits(client, org, repo_name, &branch.name, range).await?;
                let count = summary.take(counted, || {
                    format!("Counting commits on {org}/{repo_name}@{}", branch.name)
                });

                org_total += count;
                writer.row(repo_name, &branch.name, count)?;
            }
        }

        summary.commits += org_total;
        writer.org_total(org, org_total)?;
    }

    let out = writer.finish()?;

    info!(
        "Report covers {} organizations, {} repositories, {} branches, {} commits",
        summary.organizations, summary.repositories, summary.branches, summary.commits
    );
    if summary.failed_requests > 0 {
        warn!(
            "{} listing(s) stopped early on failed requests; the report may be incomplete",
            summary.failed_requests
        );
    }

    Ok((summary, out))
}
