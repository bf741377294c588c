//! Smooth scrolling for in-page anchors.
//!
//! Every `a[href^="#"]` in the document is bound once at page-ready. A click
//! on a bound anchor whose fragment names something (`#about`, not `#`)
//! cancels the default jump and asks the host to smooth-scroll to the target
//! instead. Bare `#` links keep their default behavior.

use crate::dom::{Document, NodeId};
use std::collections::BTreeSet;

/// How the host should animate a scroll request. Anchor navigation only
/// ever asks for a smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Host side effect: bring an element into view.
pub trait Scroller {
    fn scroll_into_view(&mut self, target: NodeId, behavior: ScrollBehavior);
}

/// A click being dispatched to an anchor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What a click on an anchor resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Not a bound anchor, or its fragment is empty. Default navigation proceeds.
    Ignored,
    /// Default prevented and a smooth scroll was requested.
    Scrolled(NodeId),
    /// Default prevented but no element matches the fragment.
    TargetMissing,
}

/// `true` for hrefs like `#about`; `false` for `#`, empty, or external links.
pub fn is_in_page_fragment(href: &str) -> bool {
    href.starts_with('#') && href.len() > 1
}

/// Click handlers installed on the page's fragment anchors.
#[derive(Debug, Default, Clone)]
pub struct ScrollNavigator {
    bound: BTreeSet<NodeId>,
}

impl ScrollNavigator {
    /// Bind every anchor currently in the document whose href starts with `#`.
    pub fn install(doc: &Document) -> Self {
        let bound: BTreeSet<NodeId> = doc.fragment_anchors().into_iter().collect();
        tracing::debug!(anchors = bound.len(), "bound in-page anchors");
        Self { bound }
    }

    pub fn is_bound(&self, anchor: NodeId) -> bool {
        self.bound.contains(&anchor)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Handle a click on `anchor`.
    ///
    /// The href is read at click time, so an anchor whose href was rewritten
    /// after binding is judged by its current value.
    pub fn handle_click(
        &self,
        doc: &Document,
        anchor: NodeId,
        event: &mut ClickEvent,
        scroller: &mut dyn Scroller,
    ) -> NavOutcome {
        if !self.is_bound(anchor) {
            return NavOutcome::Ignored;
        }
        let Some(href) = doc.attribute(anchor, "href") else {
            return NavOutcome::Ignored;
        };
        if !is_in_page_fragment(href) {
            return NavOutcome::Ignored;
        }

        event.prevent_default();
        match doc.query_fragment(href) {
            Some(target) => {
                scroller.scroll_into_view(target, ScrollBehavior::Smooth);
                NavOutcome::Scrolled(target)
            }
            None => {
                tracing::trace!(href, "anchor target not found");
                NavOutcome::TargetMissing
            }
        }
    }
}
