//! GitHub API client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::{
    Branch, CommitFilterParams, CommitRef, GitHubApi, Organization, PaginationParams, Repository,
};
use crate::config::Token;
use crate::error::{ApiError, Result};

/// Media type recommended for the GitHub REST API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub rejects requests without a user agent
const USER_AGENT: &str = concat!("orgcommits/", env!("CARGO_PKG_VERSION"));

/// Fallback wait when a rate-limit response carries no usable hint
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// GitHub REST API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
    token: Token,
}

impl GitHubClient {
    /// Create a client for api.github.com
    #[cfg(test)]
    pub fn new(token: Token) -> Result<Self> {
        Self::with_host(token, crate::config::DEFAULT_API_HOST)
    }

    /// Create a client for a specific API host (GitHub Enterprise, test servers)
    pub fn with_host(token: Token, host: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: host.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Make an authenticated GET request and decode a 200 response
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", path, query);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => match rate_limit_reset(response.headers()) {
                Some(wait) => Err(ApiError::RateLimit(wait).into()),
                None => Err(ApiError::Forbidden.into()),
            },
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = retry_after(response.headers())
                    .or_else(|| rate_limit_reset(response.headers()))
                    .unwrap_or(Duration::from_secs(DEFAULT_RETRY_AFTER_SECS));
                Err(ApiError::RateLimit(retry_after).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => Err(ApiError::UnexpectedStatus(status.as_u16()).into()),
        }
    }
}

/// Wait time from a `retry-after` header
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Wait time until the primary rate limit resets, if it is exhausted
fn rate_limit_reset(headers: &HeaderMap) -> Option<Duration> {
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())?;
    if remaining != "0" {
        return None;
    }

    let reset_at = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok());

    let secs = match reset_at {
        Some(epoch) => (epoch - Utc::now().timestamp()).max(0) as u64,
        None => DEFAULT_RETRY_AFTER_SECS,
    };
    Some(Duration::from_secs(secs))
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_orgs(&self, pagination: &PaginationParams) -> Result<Vec<Organization>> {
        self.get("/user/orgs", &pagination.to_query_params()).await
    }

    async fn list_repos(
        &self,
        org: &str,
        pagination: &PaginationParams,
    ) -> Result<Vec<Repository>> {
        let path = format!("/orgs/{}/repos", segment(org));
        self.get(&path, &pagination.to_query_params()).await
    }

    async fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<Branch>> {
        let path = format!("/repos/{}/{}/branches", segment(org), segment(repo));
        self.get(&path, &[]).await
    }

    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        filter: &CommitFilterParams<'_>,
        pagination: &PaginationParams,
    ) -> Result<Vec<CommitRef>> {
        let path = format!("/repos/{}/{}/commits", segment(org), segment(repo));
        let mut query = filter.to_query_params();
        query.extend(pagination.to_query_params());
        self.get(&path, &query).await
    }
}
