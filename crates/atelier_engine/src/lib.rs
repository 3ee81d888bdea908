//! Atelier engine: file-backed slice storage, static content ingestion,
//! and the overrides exporter.
mod auth;
mod export;
mod files;
mod seed;
mod storage;

pub use auth::{is_authenticated, login, logout};
pub use export::{
    apply_overrides, overrides_from_store, parse_overrides, render_overrides, write_overrides,
    Directive, ExportError, ExportSummary, OverridesScript,
};
pub use files::{ensure_data_dir, write_atomic, FileError};
pub use seed::{load_content_dir, SeedSummary, ARTICLES_SEED, OVERRIDES_FILE, PROJECTS_SEED};
pub use storage::FileStorage;
