//! Admin console for the atelier portfolio site.
//!
//! Thin driver around the content store: everything here is wiring and
//! printing; the rules live in `atelier_core` and `atelier_engine`.

mod logging;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use atelier_core::{ArticleDraft, ContentStore, FeedKind, ReviewDraft};
use atelier_engine as engine;
use atelier_engine::FileStorage;
use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

#[derive(Parser)]
#[command(name = "atelier", version, about = "Admin console for the atelier portfolio site")]
struct Cli {
    /// Directory holding the persisted slices.
    #[arg(long, default_value = "./data", env = "ATELIER_DATA_DIR")]
    data_dir: PathBuf,

    /// Directory holding the static content declarations.
    #[arg(long, default_value = "./content", env = "ATELIER_CONTENT_DIR")]
    content_dir: PathBuf,

    /// Shared admin secret checked by `login`.
    #[arg(
        long,
        default_value = "atelier",
        env = "ATELIER_ADMIN_SECRET",
        hide_env_values = true
    )]
    admin_secret: String,

    /// Also log to the terminal.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open an admin session.
    Login { password: String },
    /// Close the admin session.
    Logout,
    /// List projects with their hidden flags.
    Projects,
    /// Show the unified blog feed.
    Feed,
    /// List reviews.
    Reviews,
    /// Toggle a project's visibility.
    ToggleProject { id: String },
    /// Toggle a feed entry's visibility (project id or article id).
    ToggleBlog { id: String },
    /// Add a review.
    AddReview {
        #[arg(long)]
        client: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        text: String,
    },
    /// Delete a review by id.
    DeleteReview { id: String },
    /// Create an article.
    AddArticle {
        #[arg(long)]
        title: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        excerpt: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image: String,
        /// Project to link for cross-navigation.
        #[arg(long)]
        project: Option<String>,
    },
    /// Delete an admin-created article.
    DeleteArticle { id: String },
    /// Remove a project (and its derived blog post) from this session.
    DeleteProject { id: String },
    /// Remove a feed entry by blog id.
    DeleteBlog { id: String },
    /// Write the overrides script for publishing.
    Export {
        /// Output directory; defaults to the content directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    let mut storage = FileStorage::open(&cli.data_dir)
        .with_context(|| format!("open data dir {:?}", cli.data_dir))?;

    // Session commands act on storage directly; no store needed.
    match &cli.command {
        Command::Login { password } => {
            if !engine::login(&mut storage, &cli.admin_secret, password) {
                bail!("wrong password");
            }
            println!("Session opened.");
            return Ok(());
        }
        Command::Logout => {
            engine::logout(&mut storage);
            println!("Session closed.");
            return Ok(());
        }
        _ => {}
    }

    let mut store = ContentStore::init(Box::new(storage));
    let seeded = engine::load_content_dir(&mut store, &cli.content_dir);
    log::info!(
        "Loaded {} project and {} article declarations from {:?}",
        seeded.projects,
        seeded.articles,
        cli.content_dir
    );

    match cli.command {
        Command::Login { .. } | Command::Logout => unreachable!("handled above"),

        Command::Projects => {
            for view in store.projects() {
                println!(
                    "{} {:24} [{}]{}",
                    if view.hidden { "·" } else { "●" },
                    view.project.id,
                    view.project.category,
                    if view.project.is_conceptual { " (concept)" } else { "" },
                );
            }
        }
        Command::Feed => {
            for entry in store.blog_feed() {
                let kind = match entry.kind {
                    FeedKind::Project => "project",
                    FeedKind::Article => "article",
                };
                println!(
                    "{} {:10} {:10} {}",
                    if entry.hidden { "·" } else { "●" },
                    kind,
                    entry.date,
                    entry.title,
                );
            }
        }
        Command::Reviews => {
            for review in store.reviews() {
                println!("{:20} {} — {}", review.id, review.client, review.role);
            }
        }

        Command::ToggleProject { id } => {
            ensure_session(&store)?;
            store.toggle_project_visibility(&id);
            println!("Toggled project {id}.");
        }
        Command::ToggleBlog { id } => {
            ensure_session(&store)?;
            store.toggle_blog_visibility(&id);
            println!("Toggled blog entry {id}.");
        }
        Command::AddReview { client, role, text } => {
            ensure_session(&store)?;
            let id = store.add_review(ReviewDraft { client, role, text });
            println!("Added review {id}.");
        }
        Command::DeleteReview { id } => {
            ensure_session(&store)?;
            store.delete_review(&id);
            println!("Deleted review {id}.");
        }
        Command::AddArticle {
            title,
            date,
            excerpt,
            content,
            image,
            project,
        } => {
            ensure_session(&store)?;
            let id = store.add_article(ArticleDraft {
                project_id: project,
                title,
                date,
                excerpt,
                content,
                image,
            });
            println!("Added article {id}.");
        }
        Command::DeleteArticle { id } => {
            ensure_session(&store)?;
            store.delete_custom_article(&id);
            println!("Deleted article {id}.");
        }
        Command::DeleteProject { id } => {
            ensure_session(&store)?;
            store.delete_project(&id);
            println!("Deleted project {id}.");
        }
        Command::DeleteBlog { id } => {
            ensure_session(&store)?;
            store.delete_blog(&id);
            println!("Deleted blog entry {id}.");
        }

        Command::Export { output_dir } => {
            ensure_session(&store)?;
            let dir = output_dir.unwrap_or(cli.content_dir);
            let summary = engine::write_overrides(&store, &dir, engine::OVERRIDES_FILE)?;
            println!(
                "Exported {} hidden projects, {} hidden blogs, {} reviews, {} articles to {:?}.",
                summary.hidden_projects,
                summary.hidden_blogs,
                summary.reviews,
                summary.articles,
                summary.output_path,
            );
        }
    }

    Ok(())
}

fn ensure_session(store: &ContentStore) -> Result<()> {
    if engine::is_authenticated(store.storage()) {
        return Ok(());
    }
    bail!("no admin session; run `atelier login <password>` first")
}
