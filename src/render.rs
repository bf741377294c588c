//! Gallery markup.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the crate, so all
//! repository text (names, descriptions, URLs) is escaped on the way out.
//! Class names are the page stylesheet's contract and must not change
//! casually: `project-card`, `skeleton`, `project-media`, `project-content`,
//! `tag-chip`, `error-card`, `muted`.

use crate::project::{RepoSummary, format_updated_label};
use maud::{Markup, html};

pub const CARD_CLASS: &str = "project-card";

/// Chip text used when a repository reports no language at all.
pub const FALLBACK_TAG: &str = "Multi-lang";

/// One loading placeholder.
pub fn skeleton_card() -> Markup {
    html! {
        div.project-card.skeleton {
            div.project-media {}
            div.project-content {
                div.line.title {}
                div.line {}
                div.line.short {}
            }
        }
    }
}

/// `count` loading placeholders.
pub fn skeletons(count: usize) -> Markup {
    html! {
        @for _ in 0..count {
            (skeleton_card())
        }
    }
}

/// Language chips for a card, falling back to the primary language and then
/// to [`FALLBACK_TAG`].
pub fn card_tags(repo: &RepoSummary) -> Vec<&str> {
    if !repo.languages.is_empty() {
        return repo
            .languages
            .iter()
            .take(crate::project::MAX_LANGUAGES)
            .map(String::as_str)
            .collect();
    }
    vec![repo.language.as_deref().unwrap_or(FALLBACK_TAG)]
}

/// Inner markup of a project card. The card element itself
/// (`div.project-card.reveal`) is created by the gallery so it can be observed.
pub fn card_body(repo: &RepoSummary) -> Markup {
    let updated = format_updated_label(repo.updated_at.as_deref());
    html! {
        div.project-media {
            img src=(repo.image) alt={ (repo.name) " preview" } loading="lazy";
        }
        div.project-content {
            div.project-header {
                h3 { (repo.name) }
                span.project-updated { "Updated " (updated) }
            }
            p.project-desc { (repo.description) }
            div.project-tags {
                @for tag in card_tags(repo) {
                    span.tag-chip { (tag) }
                }
            }
            div.project-actions {
                a.btn.ghost href=(repo.html_url) target="_blank" rel="noreferrer" { "View repo" }
                @if let Some(live) = repo.live_link() {
                    a.btn.primary href=(live) target="_blank" rel="noreferrer" { "Live link" }
                }
            }
        }
    }
}

/// Shown when nothing survives selection. Not an error.
pub fn empty_state() -> Markup {
    html! {
        p.muted { "No projects to show right now." }
    }
}

/// Shown when the repository listing could not be loaded.
pub fn error_card() -> Markup {
    html! {
        div.project-card.error-card {
            h3 { "Could not load recent projects" }
            p.muted { "Please check your connection or GitHub rate limits and try again." }
        }
    }
}
