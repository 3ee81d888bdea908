//! Static content ingestion.
//!
//! The canonical content lives in declaration files the site ships with:
//! `projects.ron`, `articles.ron`, and optionally a published overrides
//! script. They are read once at startup and fed through the store's
//! idempotent upserts. A missing file simply contributes nothing; a file
//! that fails to parse is logged and skipped, it never aborts startup.

use std::fs;
use std::path::Path;

use atelier_core::{Article, ContentStore, Project};
use serde::de::DeserializeOwned;
use site_logging::{site_info, site_warn};

use crate::export::{apply_overrides, parse_overrides};

/// Project declarations filename.
pub const PROJECTS_SEED: &str = "projects.ron";
/// Article declarations filename.
pub const ARTICLES_SEED: &str = "articles.ron";
/// Published overrides script filename.
pub const OVERRIDES_FILE: &str = "site_overrides.ron";

/// What a content-directory load registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub projects: usize,
    pub articles: usize,
    pub overrides_applied: bool,
}

/// Loads the full content directory into the store: project declarations,
/// article declarations, then the published overrides script (if any).
pub fn load_content_dir(store: &mut ContentStore, dir: &Path) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for project in read_declarations::<Project>(&dir.join(PROJECTS_SEED)) {
        store.load_project(project);
        summary.projects += 1;
    }
    for article in read_declarations::<Article>(&dir.join(ARTICLES_SEED)) {
        store.load_article(article);
        summary.articles += 1;
    }

    let overrides_path = dir.join(OVERRIDES_FILE);
    if let Some(text) = read_optional(&overrides_path) {
        match parse_overrides(&text) {
            Ok(script) => {
                apply_overrides(store, &script);
                summary.overrides_applied = true;
                site_info!("Applied published overrides from {:?}", overrides_path);
            }
            Err(err) => {
                site_warn!(
                    "Ignoring unreadable overrides script {:?}: {}",
                    overrides_path,
                    err
                );
            }
        }
    }

    summary
}

fn read_declarations<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let Some(text) = read_optional(path) else {
        return Vec::new();
    };
    match ron::from_str(&text) {
        Ok(declarations) => declarations,
        Err(err) => {
            site_warn!("Ignoring unreadable declarations {:?}: {}", path, err);
            Vec::new()
        }
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            site_warn!("Failed to read {:?}: {}", path, err);
            None
        }
    }
}
