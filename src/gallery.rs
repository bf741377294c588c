//! Project gallery loader.
//!
//! One load per page, driven as a small state machine:
//!
//! ```text
//! loading ──► populated   (one card per selected repository)
//!         ├─► empty       (nothing survived selection)
//!         └─► error       (the listing could not be fetched)
//! ```
//!
//! Skeleton cards are rendered synchronously on entering `loading`, so the
//! container is never blank while the listing is in flight. Whatever happens
//! afterwards, the skeletons are replaced: by cards, by the empty message, or
//! by the error card. There are no retries; a reload is a new load.

use crate::config::FolioConfig;
use crate::dom::{Document, NodeId};
use crate::github::{FetchError, RepoSource, fetch_candidates};
use crate::project::{RepoSummary, enrich_all};
use crate::render::{self, CARD_CLASS};
use crate::reveal::{REVEAL_CLASS, RevealObserver, reveal_now};
use crate::select::select_repos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("failed to fetch repositories: {0}")]
    Fetch(#[from] FetchError),
}

/// Where a gallery load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryState {
    /// Skeletons are showing and the listing is in flight.
    Loading,
    /// Cards were rendered; holds the card count.
    Populated(usize),
    Empty,
    Error,
}

impl GalleryState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GalleryState::Loading)
    }
}

/// Drives one gallery load into a document.
pub struct GalleryLoader<'a> {
    config: &'a FolioConfig,
    source: &'a dyn RepoSource,
    state: Option<GalleryState>,
    cards: Vec<NodeId>,
    repos: Vec<RepoSummary>,
}

impl<'a> GalleryLoader<'a> {
    pub fn new(config: &'a FolioConfig, source: &'a dyn RepoSource) -> Self {
        Self {
            config,
            source,
            state: None,
            cards: Vec::new(),
            repos: Vec::new(),
        }
    }

    /// `None` until [`GalleryLoader::begin`] found the container.
    pub fn state(&self) -> Option<GalleryState> {
        self.state
    }

    /// Card elements created by the last completed load.
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    /// Repositories behind [`GalleryLoader::cards`], in card order.
    pub fn repos(&self) -> &[RepoSummary] {
        &self.repos
    }

    /// Enter `loading`: find the container and fill it with skeletons.
    ///
    /// Returns `None`, leaving the document untouched, when the page has no
    /// container with the configured id.
    pub fn begin(&mut self, doc: &mut Document) -> Option<NodeId> {
        let container_id = &self.config.gallery.container_id;
        let Some(container) = doc.get_element_by_id(container_id) else {
            tracing::debug!(container_id = %container_id, "no gallery container on page");
            return None;
        };
        doc.set_inner_html(
            container,
            render::skeletons(self.config.gallery.skeleton_count),
        );
        self.state = Some(GalleryState::Loading);
        Some(container)
    }

    /// Fetch, select, and enrich, without touching the document.
    pub async fn fetch(&self) -> Result<Vec<RepoSummary>, GalleryError> {
        let github = &self.config.github;
        let candidates = fetch_candidates(self.source, &github.account, github.per_page).await?;
        let selected = select_repos(candidates, &github.featured, self.config.gallery.max_cards);
        let repos = enrich_all(self.source, selected, &github.account, &github.preview_base).await;
        Ok(repos)
    }

    /// Leave `loading` by fetching and rendering into `container`.
    pub async fn finish(
        &mut self,
        doc: &mut Document,
        container: NodeId,
        revealer: Option<&mut RevealObserver>,
    ) -> GalleryState {
        let fetched = self.fetch().await;
        self.apply(doc, container, fetched, revealer)
    }

    /// Leave `loading` by rendering an already fetched result.
    ///
    /// New cards are handed to `revealer`; without one they are made visible
    /// on the spot. Pairs with [`GalleryLoader::fetch`] when the document has
    /// to stay usable while the requests are pending.
    pub fn apply(
        &mut self,
        doc: &mut Document,
        container: NodeId,
        fetched: Result<Vec<RepoSummary>, GalleryError>,
        revealer: Option<&mut RevealObserver>,
    ) -> GalleryState {
        let state = match fetched {
            Ok(repos) if repos.is_empty() => {
                tracing::info!("no projects selected");
                doc.set_inner_html(container, render::empty_state());
                self.cards.clear();
                self.repos.clear();
                GalleryState::Empty
            }
            Ok(repos) => {
                self.cards = populate(doc, container, &repos, revealer);
                self.repos = repos;
                tracing::info!(cards = self.cards.len(), "project gallery populated");
                GalleryState::Populated(self.cards.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "could not load projects");
                doc.set_inner_html(container, render::error_card());
                self.cards.clear();
                self.repos.clear();
                GalleryState::Error
            }
        };
        self.state = Some(state);
        state
    }

    /// Run a full load. `None` when the page has no gallery container.
    pub async fn load(
        &mut self,
        doc: &mut Document,
        revealer: Option<&mut RevealObserver>,
    ) -> Option<GalleryState> {
        let container = self.begin(doc)?;
        Some(self.finish(doc, container, revealer).await)
    }
}

/// Create a detached `div.project-card.reveal` for one repository.
pub fn create_project_card(doc: &mut Document, repo: &RepoSummary) -> NodeId {
    let card = doc.create_element("div");
    doc.add_class(card, CARD_CLASS);
    doc.add_class(card, REVEAL_CLASS);
    doc.set_inner_html(card, render::card_body(repo));
    card
}

fn populate(
    doc: &mut Document,
    container: NodeId,
    repos: &[RepoSummary],
    mut revealer: Option<&mut RevealObserver>,
) -> Vec<NodeId> {
    doc.clear(container);
    let mut cards = Vec::with_capacity(repos.len());
    for repo in repos {
        let card = create_project_card(doc, repo);
        doc.append_child(container, card);
        match revealer.as_deref_mut() {
            Some(observer) => {
                observer.observe(card);
            }
            None => reveal_now(doc, card),
        }
        cards.push(card);
    }
    cards
}

/// Convenience wrapper: run a complete load with a fresh [`GalleryLoader`].
pub async fn load_projects(
    doc: &mut Document,
    revealer: Option<&mut RevealObserver>,
    config: &FolioConfig,
    source: &dyn RepoSource,
) -> Option<GalleryState> {
    GalleryLoader::new(config, source).load(doc, revealer).await
}
