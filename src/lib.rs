//! # Simple Folio
//!
//! The runtime behind a one-page developer portfolio: smooth scrolling for
//! in-page anchors, reveal-on-scroll animations, and a "recent projects"
//! gallery fed by the GitHub REST API.
//!
//! # Architecture: Three Components, One Document
//!
//! The page markup and stylesheet belong to the site. This crate owns the
//! behavior, expressed against an in-memory [`dom::Document`] and a couple of
//! host seams:
//!
//! ```text
//! page-ready ─┬─► navigate   anchors  → smooth-scroll requests (Scroller)
//!             ├─► reveal     .reveal  → .visible at 15% in view (one-shot)
//!             └─► gallery    GitHub   → skeletons → cards | empty | error
//!                                          │
//!                                          └─► new cards registered with reveal
//! ```
//!
//! The gallery is the only asynchronous part. Its pipeline is linear:
//! listing request → drop archived and forks → select (featured list or
//! recency) → enrich every selected repository concurrently with its
//! language breakdown → render.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | Arena-backed document: ids, classes, anchors, markup replacement |
//! | [`navigate`] | In-page anchor click handling |
//! | [`reveal`] | Viewport-triggered `visible` class, with a no-observer fallback |
//! | [`github`] | `RepoSource` trait, reqwest client, listing filter, language ordering |
//! | [`select`] | Featured-or-recent repository selection |
//! | [`project`] | `RepoSummary`, language list, date label, concurrent enrichment |
//! | [`render`] | Maud markup for skeletons, cards, empty and error states |
//! | [`gallery`] | The loading → populated/empty/error state machine |
//! | [`page`] | Page-ready wiring of the three components |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failure Is Local
//!
//! Only the repository listing can fail a gallery load, and it fails to a
//! static error card. A language breakdown that cannot be fetched is treated
//! as "no languages"; a missing anchor target or a host without
//! intersection support degrade silently. Nothing retries: reloading the
//! page is the retry.
//!
//! ## Over-Fetch, Then Filter
//!
//! GitHub's listing cannot exclude forks or archived repositories, so the
//! loader asks for a page of 50 and filters locally. One request is enough
//! for a four-card gallery; there is no pagination.
//!
//! ## Maud For Markup
//!
//! Card text comes from third parties (repository names, descriptions,
//! homepages), so markup is built with [Maud](https://maud.lambda.xyz/) and
//! every interpolation is escaped.

pub mod config;
pub mod dom;
pub mod gallery;
pub mod github;
pub mod navigate;
pub mod output;
pub mod page;
pub mod project;
pub mod render;
pub mod reveal;
pub mod select;

#[cfg(test)]
pub(crate) mod test_helpers;
