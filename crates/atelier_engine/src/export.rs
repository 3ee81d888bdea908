//! The overrides script: serializing local edits into a re-loadable
//! artifact, and replaying such an artifact into a store.
//!
//! Publishing is manual by design: the admin exports the script and
//! commits it next to the static content declarations. Replaying uses only
//! the non-persisting store operations, so an imported baseline never
//! overwrites the local slices; re-export to adopt it as the new local
//! state.

use std::path::{Path, PathBuf};

use atelier_core::{Article, ContentStore, Review};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::files::{write_atomic, FileError};

/// One replayable store call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    SetHiddenProjects(Vec<String>),
    SetHiddenBlogs(Vec<String>),
    AddReview(Review),
    AddArticle(Article),
}

/// A full overrides script, in replay order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverridesScript {
    pub directives: Vec<Directive>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize overrides: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to parse overrides: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("persist error: {0}")]
    File(#[from] FileError),
}

/// What an export wrote, for reporting back to the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub hidden_projects: usize,
    pub hidden_blogs: usize,
    pub reviews: usize,
    pub articles: usize,
    pub output_path: PathBuf,
}

/// Captures the store's current overrides as a script.
///
/// Order matters twice over: the hidden sets come first so a replayed
/// script starts from the published visibility state, and custom reviews
/// are emitted oldest first because replay inserts each at the front,
/// which rebuilds the newest-first presentation order.
pub fn overrides_from_store(store: &ContentStore) -> OverridesScript {
    let mut directives = vec![
        Directive::SetHiddenProjects(store.hidden_project_ids().to_vec()),
        Directive::SetHiddenBlogs(store.hidden_blog_ids().to_vec()),
    ];
    let mut custom_reviews: Vec<&Review> = store.custom_reviews().collect();
    custom_reviews.reverse();
    directives.extend(
        custom_reviews
            .into_iter()
            .map(|review| Directive::AddReview(review.clone())),
    );
    directives.extend(
        store
            .custom_articles()
            .iter()
            .map(|article| Directive::AddArticle(article.clone())),
    );
    OverridesScript { directives }
}

/// Renders a script as RON text, the committed artifact format.
pub fn render_overrides(script: &OverridesScript) -> Result<String, ExportError> {
    let pretty = ron::ser::PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(script, pretty)?)
}

/// Parses a previously rendered script.
pub fn parse_overrides(text: &str) -> Result<OverridesScript, ExportError> {
    Ok(ron::from_str(text)?)
}

/// Replays a script against a store.
///
/// Only non-persisting operations are used: the hidden sets are replaced
/// in memory, reviews and articles register through the idempotent load
/// path with their exported ids intact.
pub fn apply_overrides(store: &mut ContentStore, script: &OverridesScript) {
    for directive in &script.directives {
        match directive {
            Directive::SetHiddenProjects(ids) => store.set_hidden_projects(ids.clone()),
            Directive::SetHiddenBlogs(ids) => store.set_hidden_blogs(ids.clone()),
            Directive::AddReview(review) => store.load_review(review.clone()),
            Directive::AddArticle(article) => store.load_article(article.clone()),
        }
    }
}

/// Exports the store's overrides to `{dir}/{filename}` atomically.
pub fn write_overrides(
    store: &ContentStore,
    dir: &Path,
    filename: &str,
) -> Result<ExportSummary, ExportError> {
    let script = overrides_from_store(store);
    let text = render_overrides(&script)?;
    let output_path = write_atomic(dir, filename, &text)?;

    let mut summary = ExportSummary {
        hidden_projects: 0,
        hidden_blogs: 0,
        reviews: 0,
        articles: 0,
        output_path,
    };
    for directive in &script.directives {
        match directive {
            Directive::SetHiddenProjects(ids) => summary.hidden_projects = ids.len(),
            Directive::SetHiddenBlogs(ids) => summary.hidden_blogs = ids.len(),
            Directive::AddReview(_) => summary.reviews += 1,
            Directive::AddArticle(_) => summary.articles += 1,
        }
    }
    Ok(summary)
}
