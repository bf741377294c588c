//! Page-ready wiring.
//!
//! [`PageRuntime::ready`] is the page-ready handler: it binds the anchors and
//! sets up reveal-on-scroll, in that order. The gallery is the only
//! asynchronous part and is driven in three steps so the document is never
//! borrowed while requests are pending:
//!
//! ```text
//! begin_gallery(&mut loader)          skeletons in, container found
//! loader.fetch().await                network only; click/intersect still allowed
//! apply_gallery(&mut loader, ..)      cards, empty message, or error card
//! ```
//!
//! [`PageRuntime::load_gallery`] runs the three back to back for hosts that
//! have nothing else to deliver meanwhile.

use crate::config::FolioConfig;
use crate::dom::{Document, NodeId};
use crate::gallery::{GalleryError, GalleryLoader, GalleryState};
use crate::github::RepoSource;
use crate::project::RepoSummary;
use crate::navigate::{ClickEvent, NavOutcome, ScrollNavigator, Scroller};
use crate::reveal::{IntersectionEntry, IntersectionSupport, RevealObserver, init_reveal};

/// The three page components, initialised against one document.
pub struct PageRuntime {
    document: Document,
    navigator: ScrollNavigator,
    revealer: Option<RevealObserver>,
}

impl PageRuntime {
    pub fn ready(mut document: Document, support: IntersectionSupport) -> Self {
        let navigator = ScrollNavigator::install(&document);
        let revealer = init_reveal(&mut document, support);
        Self {
            document,
            navigator,
            revealer,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn navigator(&self) -> &ScrollNavigator {
        &self.navigator
    }

    /// `None` when the host has no intersection support.
    pub fn revealer(&self) -> Option<&RevealObserver> {
        self.revealer.as_ref()
    }

    /// Dispatch a click on `anchor`. The returned event tells the host
    /// whether to suppress its default navigation.
    pub fn click(&self, anchor: NodeId, scroller: &mut dyn Scroller) -> (ClickEvent, NavOutcome) {
        let mut event = ClickEvent::new();
        let outcome = self
            .navigator
            .handle_click(&self.document, anchor, &mut event, scroller);
        (event, outcome)
    }

    /// Deliver intersection reports. Returns the elements revealed.
    pub fn intersect(&mut self, entries: &[IntersectionEntry]) -> Vec<NodeId> {
        match self.revealer.as_mut() {
            Some(observer) => observer.handle_entries(&mut self.document, entries),
            None => Vec::new(),
        }
    }

    /// Put the gallery into `loading`. `None` when the page has no container.
    pub fn begin_gallery(&mut self, loader: &mut GalleryLoader<'_>) -> Option<NodeId> {
        loader.begin(&mut self.document)
    }

    /// Render a result obtained from [`GalleryLoader::fetch`]. New cards join
    /// the page's reveal observer.
    pub fn apply_gallery(
        &mut self,
        loader: &mut GalleryLoader<'_>,
        container: NodeId,
        fetched: Result<Vec<RepoSummary>, GalleryError>,
    ) -> GalleryState {
        loader.apply(&mut self.document, container, fetched, self.revealer.as_mut())
    }

    /// Load the project gallery into the page in one go.
    pub async fn load_gallery(
        &mut self,
        config: &FolioConfig,
        source: &dyn RepoSource,
    ) -> Option<GalleryState> {
        let mut loader = GalleryLoader::new(config, source);
        let container = self.begin_gallery(&mut loader)?;
        let fetched = loader.fetch().await;
        Some(self.apply_gallery(&mut loader, container, fetched))
    }
}
