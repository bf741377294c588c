//! Reveal-on-scroll.
//!
//! Elements carrying the `reveal` class start hidden (by page CSS) and gain
//! `visible` the first time at least [`REVEAL_THRESHOLD`] of them is in the
//! viewport. The transition is one-shot: a revealed element is unobserved
//! and never re-evaluated.
//!
//! Intersection reports come from the host as [`IntersectionEntry`] batches,
//! the same shape a browser `IntersectionObserver` callback receives. Hosts
//! without intersection support get the degraded path: everything is shown
//! immediately and no observer exists.

use crate::dom::{Document, NodeId};
use std::collections::BTreeSet;

pub const REVEAL_CLASS: &str = "reveal";
pub const VISIBLE_CLASS: &str = "visible";

/// Fraction of the element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.15;

/// Whether the host can report viewport intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionSupport {
    Supported,
    Unsupported,
}

/// One intersection change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: NodeId, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_intersecting: intersection_ratio > 0.0,
            intersection_ratio,
        }
    }
}

/// The page's single viewport observer.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<NodeId>,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: BTreeSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching an element. Returns `false` if it was already watched.
    pub fn observe(&mut self, node: NodeId) -> bool {
        self.observed.insert(node)
    }

    pub fn unobserve(&mut self, node: NodeId) -> bool {
        self.observed.remove(&node)
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    fn qualifies(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting && entry.intersection_ratio >= self.threshold
    }

    /// Apply a batch of intersection reports.
    ///
    /// Returns the elements revealed by this batch, in entry order.
    pub fn handle_entries(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
    ) -> Vec<NodeId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !self.is_observing(entry.target) || !self.qualifies(entry) {
                continue;
            }
            doc.add_class(entry.target, VISIBLE_CLASS);
            self.unobserve(entry.target);
            revealed.push(entry.target);
        }
        if !revealed.is_empty() {
            tracing::trace!(count = revealed.len(), "revealed elements");
        }
        revealed
    }
}

/// Mark an element visible without observing it.
pub fn reveal_now(doc: &mut Document, node: NodeId) {
    doc.add_class(node, VISIBLE_CLASS);
}

/// Set up reveal-on-scroll for every `.reveal` element in the document.
///
/// Returns the observer so later content can be registered on it, or `None`
/// when the host has no intersection support (everything is shown instead).
pub fn init_reveal(doc: &mut Document, support: IntersectionSupport) -> Option<RevealObserver> {
    let elements = doc.elements_with_class(REVEAL_CLASS);

    if support == IntersectionSupport::Unsupported {
        tracing::debug!(
            count = elements.len(),
            "intersection observation unsupported, showing all reveal elements"
        );
        for node in elements {
            reveal_now(doc, node);
        }
        return None;
    }

    let mut observer = RevealObserver::default();
    for node in elements {
        observer.observe(node);
    }
    Some(observer)
}
