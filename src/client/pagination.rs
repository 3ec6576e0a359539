//! Pagination helpers for API requests
//!
//! GitHub list endpoints take `per_page` and a 1-based `page`. A walk asks for
//! consecutive pages until one comes back empty or a request fails.

use std::future::Future;

use log::debug;

use crate::config::DateRange;
use crate::error::{ApiError, Error, Result};

/// Maximum page size supported by the GitHub REST API.
/// Using this as default minimizes API calls.
pub const MAX_PAGE_SIZE: usize = 100;

/// GitHub pages are numbered from 1.
pub const FIRST_PAGE: usize = 1;

/// Pagination parameters for API requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().per_page(50).page(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// Number of items per page (max: 100)
    pub per_page: usize,
    /// Page number, 1-based
    pub page: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            per_page: MAX_PAGE_SIZE,
            page: FIRST_PAGE,
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size, clamped to what the API accepts.
    pub fn per_page(mut self, size: usize) -> Self {
        self.per_page = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(FIRST_PAGE);
        self
    }

    /// The parameters for the page after this one.
    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Filters for the commit listing endpoint.
#[derive(Debug, Clone, Copy)]
pub struct CommitFilterParams<'a> {
    /// Branch name (or any ref) to list history from
    pub sha: &'a str,
    /// Reporting window
    pub range: &'a DateRange,
}

impl<'a> CommitFilterParams<'a> {
    pub fn new(sha: &'a str, range: &'a DateRange) -> Self {
        Self { sha, range }
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sha", self.sha.to_string()),
            ("since", self.range.since_param()),
            ("until", self.range.until_param()),
        ]
    }
}

/// Why a page walk stopped.
#[derive(Debug)]
pub enum PageEnd {
    /// An empty page came back: there is nothing more to fetch.
    Exhausted,
    /// A request failed. Items from earlier pages were kept.
    Failed(ApiError),
}

/// Result of walking a paginated endpoint.
#[derive(Debug)]
pub struct PageWalk {
    /// Number of non-empty pages handed to the sink
    pub pages: usize,
    /// Total number of items across those pages
    pub items: usize,
    /// How the walk ended
    pub end: PageEnd,
}

impl PageWalk {
    /// The failure that ended the walk, if any.
    pub fn into_failure(self) -> Option<ApiError> {
        match self.end {
            PageEnd::Exhausted => None,
            PageEnd::Failed(err) => Some(err),
        }
    }
}

/// Walk a paginated endpoint from the first page.
///
/// `fetch_page` is called with consecutive page numbers; every non-empty page
/// is passed to `sink`. The walk stops after exactly one empty page, or on
/// the first error that [`ApiError::ends_pagination`]. Any other error is
/// returned as is.
pub async fn walk_pages<T, F, Fut, S>(
    per_page: usize,
    mut fetch_page: F,
    mut sink: S,
) -> Result<PageWalk>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    S: FnMut(Vec<T>),
{
    let mut params = PaginationParams::new().per_page(per_page).page(FIRST_PAGE);
    let mut pages = 0;
    let mut items = 0;

    loop {
        match fetch_page(params).await {
            Ok(page) if page.is_empty() => {
                return Ok(PageWalk {
                    pages,
                    items,
                    end: PageEnd::Exhausted,
                });
            }
            Ok(page) => {
                pages += 1;
                items += page.len();
                sink(page);
                params = params.next();
            }
            Err(Error::Api(err)) if err.ends_pagination() => {
                debug!("Pagination stopped at page {}: {}", params.page, err);
                return Ok(PageWalk {
                    pages,
                    items,
                    end: PageEnd::Failed(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}
