//! Shared test utilities for the simple-folio test suite.
//!
//! Provides a sample page document, a scroll recorder, listing-item
//! builders, and [`StubSource`], an in-memory [`RepoSource`] with call
//! counters and per-URL delays.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = StubSource::with_repos(vec![api_repo("folio")])
//!     .with_languages("https://stub/folio/languages", &[("Rust", 900)]);
//! let (mut doc, container) = gallery_page();
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::dom::{Document, NodeId};
use crate::github::{ApiRepo, FetchError, LanguageBreakdown, RepoOwner, RepoSource};
use crate::navigate::{ScrollBehavior, Scroller};
use crate::project::{DEFAULT_DESCRIPTION, RepoSummary};

// =========================================================================
// Documents
// =========================================================================

/// A small portfolio page with handles to the interesting nodes.
pub struct SamplePage {
    pub doc: Document,
    /// `a[href="#about"]`
    pub about_link: NodeId,
    /// `a[href="#"]`
    pub bare_link: NodeId,
    /// `a[href="#nowhere"]`, no matching element
    pub missing_link: NodeId,
    /// `a[href="https://example.com"]`
    pub external_link: NodeId,
    /// `section#about.reveal`
    pub about: NodeId,
    /// `section#contact.reveal`
    pub contact: NodeId,
    /// `div#projects-list`
    pub projects: NodeId,
}

pub fn sample_page() -> SamplePage {
    let mut doc = Document::new();
    let body = doc.body();

    let nav = doc.append_new(body, "nav");
    let link = |doc: &mut Document, href: &str| {
        let a = doc.append_new(nav, "a");
        doc.set_attribute(a, "href", href);
        a
    };
    let about_link = link(&mut doc, "#about");
    let bare_link = link(&mut doc, "#");
    let missing_link = link(&mut doc, "#nowhere");
    let external_link = link(&mut doc, "https://example.com");

    let about = doc.append_new(body, "section");
    doc.set_id(about, "about");
    doc.add_class(about, "reveal");

    let work = doc.append_new(body, "section");
    doc.set_id(work, "work");
    let projects = doc.append_new(work, "div");
    doc.set_id(projects, "projects-list");

    let contact = doc.append_new(body, "section");
    doc.set_id(contact, "contact");
    doc.add_class(contact, "reveal");

    SamplePage {
        doc,
        about_link,
        bare_link,
        missing_link,
        external_link,
        about,
        contact,
        projects,
    }
}

/// A document holding only the default gallery container.
pub fn gallery_page() -> (Document, NodeId) {
    let mut doc = Document::new();
    let container = doc.append_new(doc.body(), "div");
    doc.set_id(container, "projects-list");
    (doc, container)
}

/// Records scroll requests instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingScroller {
    pub requests: Vec<(NodeId, ScrollBehavior)>,
}

impl Scroller for RecordingScroller {
    fn scroll_into_view(&mut self, target: NodeId, behavior: ScrollBehavior) {
        self.requests.push((target, behavior));
    }
}

// =========================================================================
// Repository builders
// =========================================================================

/// A plain owned repository with a stub languages URL.
pub fn api_repo(name: &str) -> ApiRepo {
    ApiRepo {
        name: name.to_string(),
        owner: Some(RepoOwner {
            login: "octocat".to_string(),
        }),
        description: Some(format!("{name} description")),
        language: Some("Rust".to_string()),
        updated_at: Some("2024-03-15T00:00:00Z".to_string()),
        pushed_at: None,
        html_url: format!("https://github.com/octocat/{name}"),
        homepage: None,
        archived: false,
        fork: false,
        languages_url: Some(format!("https://stub/{name}/languages")),
    }
}

/// A card summary with no date, languages, or homepage.
pub fn summary(name: &str) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        owner: "octocat".to_string(),
        description: DEFAULT_DESCRIPTION.to_string(),
        language: None,
        updated_at: None,
        html_url: format!("https://github.com/octocat/{name}"),
        homepage: None,
        image: format!("https://opengraph.githubassets.com/1/octocat/{name}"),
        languages: Vec::new(),
    }
}

// =========================================================================
// StubSource
// =========================================================================

/// In-memory [`RepoSource`].
///
/// Unknown language URLs answer 404, like a repository deleted mid-load.
#[derive(Default)]
pub struct StubSource {
    repos: Vec<ApiRepo>,
    fail_listing: bool,
    languages: HashMap<String, LanguageBreakdown>,
    delays: HashMap<String, u64>,
    listing_calls: AtomicUsize,
    language_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSource {
    pub fn with_repos(repos: Vec<ApiRepo>) -> Self {
        Self {
            repos,
            ..Self::default()
        }
    }

    pub fn failing_listing() -> Self {
        Self {
            fail_listing: true,
            ..Self::default()
        }
    }

    pub fn with_languages(mut self, url: &str, languages: &[(&str, u64)]) -> Self {
        let breakdown = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), *bytes))
            .collect();
        self.languages.insert(url.to_string(), breakdown);
        self
    }

    /// Delay the answer for `url` by `millis`.
    pub fn with_delay(mut self, url: &str, millis: u64) -> Self {
        self.delays.insert(url.to_string(), millis);
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn language_calls(&self) -> usize {
        self.language_calls.load(Ordering::SeqCst)
    }

    /// Highest number of language requests that were pending at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for StubSource {
    async fn list_repos(&self, _account: &str, _per_page: u32) -> Result<Vec<ApiRepo>, FetchError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(FetchError::Status {
                url: "https://stub/users/octocat/repos".to_string(),
                status: reqwest::StatusCode::FORBIDDEN,
            });
        }
        Ok(self.repos.clone())
    }

    async fn languages(&self, url: &str) -> Result<LanguageBreakdown, FetchError> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(millis) = self.delays.get(url) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.languages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}
