//! Repository summaries shown on project cards.
//!
//! A [`RepoSummary`] is built from a listing item plus its language
//! breakdown. Enrichment of a whole selection runs as one concurrent batch;
//! a repository whose breakdown cannot be fetched simply has no extra
//! languages, it never fails the batch.

use crate::github::{ApiRepo, RepoSource, fetch_languages};
use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use serde::Serialize;

/// Shown when a repository has no description.
pub const DEFAULT_DESCRIPTION: &str = "No description available yet.";

/// Most language chips a card will show.
pub const MAX_LANGUAGES: usize = 6;

/// Everything a project card needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub owner: String,
    pub description: String,
    /// Primary language as reported by the listing.
    pub language: Option<String>,
    /// Last update, falling back to last push.
    pub updated_at: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    /// Social-preview image URL.
    pub image: String,
    /// Up to [`MAX_LANGUAGES`] names, primary first, no duplicates.
    pub languages: Vec<String>,
}

impl RepoSummary {
    /// The homepage as written, if it is set to something other than
    /// whitespace.
    pub fn live_link(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// Merge the primary language into the breakdown list.
///
/// The primary language leads, duplicates and blanks are dropped, the rest
/// keep their order, and the result is capped at [`MAX_LANGUAGES`].
pub fn build_language_list(primary: Option<&str>, languages: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(MAX_LANGUAGES);
    let primary = primary.filter(|p| !p.is_empty());
    for name in primary.into_iter().chain(languages.iter().map(String::as_str)) {
        if unique.len() == MAX_LANGUAGES {
            break;
        }
        if !name.is_empty() && !unique.iter().any(|u| u == name) {
            unique.push(name.to_string());
        }
    }
    unique
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Short month and year for the "Updated …" label, e.g. `Mar 2024`.
///
/// Missing or unparseable timestamps read as `recently`.
pub fn format_updated_label(timestamp: Option<&str>) -> String {
    timestamp
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(parse_timestamp)
        .map(|dt| dt.format("%b %Y").to_string())
        .unwrap_or_else(|| "recently".to_string())
}

/// Generated social-preview image for `owner/name`.
pub fn preview_image_url(preview_base: &str, owner: &str, name: &str) -> String {
    format!("{}/1/{}/{}", preview_base.trim_end_matches('/'), owner, name)
}

/// Build the card data for one repository.
pub async fn enrich_repo(
    source: &dyn RepoSource,
    repo: ApiRepo,
    account: &str,
    preview_base: &str,
) -> RepoSummary {
    let languages = fetch_languages(source, repo.languages_url.as_deref()).await;
    let owner = repo.owner_login().unwrap_or(account).to_string();
    let languages = build_language_list(repo.language.as_deref(), &languages);
    let image = preview_image_url(preview_base, &owner, &repo.name);
    let description = repo
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    RepoSummary {
        name: repo.name,
        owner,
        description,
        language: repo.language,
        updated_at: repo.updated_at.or(repo.pushed_at),
        html_url: repo.html_url,
        homepage: repo.homepage,
        image,
        languages,
    }
}

/// Enrich a selection concurrently. Output order matches input order.
pub async fn enrich_all(
    source: &dyn RepoSource,
    repos: Vec<ApiRepo>,
    account: &str,
    preview_base: &str,
) -> Vec<RepoSummary> {
    join_all(
        repos
            .into_iter()
            .map(|repo| enrich_repo(source, repo, account, preview_base)),
    )
    .await
}
