//! Choosing which repositories become cards.

use crate::github::ApiRepo;
use std::collections::HashMap;

/// Pick the repositories to show.
///
/// With a non-empty `featured` list, each name is looked up
/// case-insensitively among `candidates` and the featured order is kept;
/// names that match nothing are skipped. Without one, the candidates are
/// taken as they come (the listing is already most-recently-updated first).
/// Either way at most `limit` repositories are returned.
pub fn select_repos(candidates: Vec<ApiRepo>, featured: &[String], limit: usize) -> Vec<ApiRepo> {
    if featured.is_empty() {
        return candidates.into_iter().take(limit).collect();
    }

    let mut by_name: HashMap<String, ApiRepo> = HashMap::with_capacity(candidates.len());
    for repo in candidates {
        // First occurrence wins, matching the listing's recency order.
        by_name.entry(repo.name.to_lowercase()).or_insert(repo);
    }

    let mut selected = Vec::with_capacity(limit.min(featured.len()));
    for name in featured {
        if selected.len() == limit {
            break;
        }
        match by_name.remove(&name.to_lowercase()) {
            Some(repo) => selected.push(repo),
            None => tracing::debug!(name = %name, "featured repository not found"),
        }
    }
    selected
}
