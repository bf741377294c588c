//! GitHub REST access.
//!
//! Two endpoints are used: the owner's repository listing and each
//! repository's language breakdown. Both go through the [`RepoSource`]
//! trait so the gallery can be driven by [`GitHubClient`] in production and
//! by an in-memory source in tests.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

/// One repository as returned by `GET /users/{account}/repos`.
///
/// Only the fields the gallery reads are kept; everything but `name` may be
/// absent or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRepo {
    pub name: String,
    #[serde(default)]
    pub owner: Option<RepoOwner>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub languages_url: Option<String>,
}

impl ApiRepo {
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.login.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Language name → bytes of code, as returned by a repo's `languages_url`.
pub type LanguageBreakdown = BTreeMap<String, u64>;

/// Anything that can answer the two repository queries.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// List the account's own repositories, most recently updated first.
    async fn list_repos(&self, account: &str, per_page: u32) -> Result<Vec<ApiRepo>, FetchError>;

    /// Fetch a repository's language breakdown from its `languages_url`.
    async fn languages(&self, url: &str) -> Result<LanguageBreakdown, FetchError>;
}

/// `reqwest`-backed [`RepoSource`] talking to the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: Url,
}

impl GitHubClient {
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let api_base =
            Url::parse(api_base).map_err(|e| FetchError::InvalidUrl(format!("{api_base}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        // GitHub rejects requests without a User-Agent.
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("simple-folio/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// `{api_base}/users/{account}/repos?sort=updated&per_page={n}&type=owner`
    pub fn repos_url(&self, account: &str, per_page: u32) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["users", account, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &per_page.to_string())
            .append_pair("type", "owner");
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_repos(&self, account: &str, per_page: u32) -> Result<Vec<ApiRepo>, FetchError> {
        let url = self.repos_url(account, per_page)?;
        self.get_json(url).await
    }

    async fn languages(&self, url: &str) -> Result<LanguageBreakdown, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        self.get_json(url).await
    }
}

/// Fetch the account's repositories, dropping archived and forked ones.
pub async fn fetch_candidates(
    source: &dyn RepoSource,
    account: &str,
    per_page: u32,
) -> Result<Vec<ApiRepo>, FetchError> {
    let repos = source.list_repos(account, per_page).await?;
    let fetched = repos.len();
    let candidates: Vec<ApiRepo> = repos
        .into_iter()
        .filter(|repo| !repo.archived && !repo.fork)
        .collect();
    tracing::debug!(
        account,
        fetched,
        kept = candidates.len(),
        "filtered archived and forked repositories"
    );
    Ok(candidates)
}

/// Language names ordered by descending byte count.
///
/// Ties keep alphabetical order.
pub fn languages_by_size(breakdown: &LanguageBreakdown) -> Vec<String> {
    let mut entries: Vec<(&String, &u64)> = breakdown.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries.into_iter().map(|(name, _)| name.clone()).collect()
}

/// A repository's languages, largest first. Any failure yields an empty list.
pub async fn fetch_languages(source: &dyn RepoSource, languages_url: Option<&str>) -> Vec<String> {
    let Some(url) = languages_url.filter(|u| !u.is_empty()) else {
        return Vec::new();
    };
    match source.languages(url).await {
        Ok(breakdown) => languages_by_size(&breakdown),
        Err(e) => {
            tracing::debug!(url, error = %e, "language breakdown unavailable");
            Vec::new()
        }
    }
}
