//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Render output
//! also has a `write_*` form for when stdout carries the markup. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Render
//!
//! ```text
//! Gallery: populated (2 cards)
//!     001 folio
//!         Updated: Mar 2024
//!         Languages: Rust, Shell
//!         Live: https://folio.example
//!     002 engine
//!         Updated: recently
//!         Languages: (none)
//! ```
//!
//! ## Check
//!
//! ```text
//! Account: Aaron-2005
//! Selection: 4 most recently updated (of 50 fetched)
//! Container: #projects-list (4 skeletons)
//! ```

use crate::config::FolioConfig;
use crate::gallery::GalleryState;
use crate::project::{RepoSummary, format_updated_label};
use std::io::{self, Write};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn state_label(state: Option<GalleryState>) -> String {
    match state {
        None => "no container".to_string(),
        Some(GalleryState::Loading) => "loading".to_string(),
        Some(GalleryState::Populated(1)) => "populated (1 card)".to_string(),
        Some(GalleryState::Populated(n)) => format!("populated ({n} cards)"),
        Some(GalleryState::Empty) => "empty".to_string(),
        Some(GalleryState::Error) => "error".to_string(),
    }
}

/// Format the outcome of a gallery render with one entry per card.
pub fn format_render_output(state: Option<GalleryState>, repos: &[RepoSummary]) -> Vec<String> {
    let mut lines = vec![format!("Gallery: {}", state_label(state))];
    for (i, repo) in repos.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), repo.name));
        lines.push(format!(
            "{}Updated: {}",
            indent(2),
            format_updated_label(repo.updated_at.as_deref())
        ));
        let languages = if repo.languages.is_empty() {
            "(none)".to_string()
        } else {
            repo.languages.join(", ")
        };
        lines.push(format!("{}Languages: {}", indent(2), languages));
        if let Some(live) = repo.live_link() {
            lines.push(format!("{}Live: {}", indent(2), live.trim()));
        }
    }
    lines
}

pub fn print_render_output(state: Option<GalleryState>, repos: &[RepoSummary]) {
    for line in format_render_output(state, repos) {
        println!("{}", line);
    }
}

/// Like [`print_render_output`], into any writer.
pub fn write_render_output(
    out: &mut impl Write,
    state: Option<GalleryState>,
    repos: &[RepoSummary],
) -> io::Result<()> {
    for line in format_render_output(state, repos) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Summarize a loaded config.
pub fn format_check_output(config: &FolioConfig) -> Vec<String> {
    let github = &config.github;
    let gallery = &config.gallery;
    let mut lines = vec![format!("Account: {}", github.account)];
    if github.featured.is_empty() {
        lines.push(format!(
            "Selection: {} most recently updated (of {} fetched)",
            gallery.max_cards, github.per_page
        ));
    } else {
        lines.push(format!(
            "Selection: featured, up to {} (of {} fetched)",
            gallery.max_cards, github.per_page
        ));
        for (i, name) in github.featured.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
        }
    }
    lines.push(format!(
        "Container: #{} ({} skeletons)",
        gallery.container_id, gallery.skeleton_count
    ));
    lines
}

pub fn print_check_output(config: &FolioConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}
