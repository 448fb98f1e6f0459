//! vetrina: content-resolution and caching layer for a bilingual
//! marketing site backed by a headless CMS.
//!
//! The crate follows the `domain` / `application` / `cache` / `infra` /
//! `config` split; the application-layer entry points are re-exported at
//! the crate root for convenience.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::error::{ContentError, ErrorPresentation};
pub use application::orchestrator::{FetchOrchestrator, LoadRequest};
pub use application::prefetch::{PrefetchTrigger, Prefetcher};
pub use application::views::ViewCounter;
