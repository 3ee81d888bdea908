//! The content store: owns all in-memory collections, the persisted
//! slices, and the visibility model.

use chrono::Utc;
use log::debug;

use crate::feed::{parse_feed_date, FeedEntry, FeedKind};
use crate::model::{
    default_reviews, Article, ArticleDraft, Project, ProjectBlogPost, Review, ReviewDraft,
    CUSTOM_ARTICLE_PREFIX, CUSTOM_REVIEW_PREFIX,
};
use crate::storage::{
    read_slice, write_slice, SliceRead, Storage, CUSTOM_ARTICLES_KEY, CUSTOM_REVIEWS_KEY,
    HIDDEN_BLOGS_KEY, HIDDEN_PROJECTS_KEY,
};

/// A project snapshot annotated with its hidden flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub project: Project,
    pub hidden: bool,
}

/// In-memory content store for one session.
///
/// Collections are populated once at startup (`init` plus the static
/// content declarations) and mutated only through the methods below.
/// Exactly three slices persist across sessions: the two hidden-id sets,
/// admin-created reviews, and admin-created articles; everything else is
/// rebuilt from the declarations on every start.
pub struct ContentStore {
    storage: Box<dyn Storage>,
    projects: Vec<Project>,
    project_posts: Vec<ProjectBlogPost>,
    articles: Vec<Article>,
    custom_articles: Vec<Article>,
    reviews: Vec<Review>,
    hidden_projects: Vec<String>,
    hidden_blogs: Vec<String>,
}

impl ContentStore {
    /// Builds a store from the persisted slices.
    ///
    /// Every slice falls back independently: a missing or malformed slice
    /// degrades to its own default (empty sets, the seeded reviews) and
    /// never fails the rest of initialization. The review slice is seeded
    /// and written back on first run only; a malformed slice is replaced
    /// in memory but left on disk until the next legitimate write.
    pub fn init(mut storage: Box<dyn Storage>) -> Self {
        let hidden_projects = match read_slice(storage.as_ref(), HIDDEN_PROJECTS_KEY) {
            SliceRead::Loaded(ids) => ids,
            SliceRead::Absent | SliceRead::Malformed => Vec::new(),
        };
        let hidden_blogs = match read_slice(storage.as_ref(), HIDDEN_BLOGS_KEY) {
            SliceRead::Loaded(ids) => ids,
            SliceRead::Absent | SliceRead::Malformed => Vec::new(),
        };
        let reviews = match read_slice(storage.as_ref(), CUSTOM_REVIEWS_KEY) {
            SliceRead::Loaded(reviews) => reviews,
            SliceRead::Absent => {
                let seeded = default_reviews();
                write_slice(storage.as_mut(), CUSTOM_REVIEWS_KEY, &seeded);
                seeded
            }
            SliceRead::Malformed => default_reviews(),
        };
        let custom_articles: Vec<Article> = match read_slice(storage.as_ref(), CUSTOM_ARTICLES_KEY)
        {
            SliceRead::Loaded(articles) => articles,
            SliceRead::Absent | SliceRead::Malformed => Vec::new(),
        };

        let mut store = Self {
            storage,
            projects: Vec::new(),
            project_posts: Vec::new(),
            articles: Vec::new(),
            custom_articles: custom_articles.clone(),
            reviews,
            hidden_projects,
            hidden_blogs,
        };
        // Persisted customs enter the live feed through the same upsert as
        // declarations loaded later, so a clashing declaration is a no-op.
        for article in custom_articles {
            store.load_article(article);
        }
        store
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Registers a project declaration. First write wins: a duplicate id is
    /// a silent no-op even when the other fields differ.
    pub fn load_project(&mut self, project: Project) {
        if self.projects.iter().any(|p| p.id == project.id) {
            debug!("Ignoring duplicate project declaration {:?}", project.id);
            return;
        }
        if let Some(seed) = &project.blog {
            self.project_posts
                .push(ProjectBlogPost::from_seed(&project, seed));
        }
        self.projects.push(project);
    }

    /// Registers a standalone article. First write wins, as for projects.
    pub fn load_article(&mut self, article: Article) {
        if self.articles.iter().any(|a| a.id == article.id) {
            debug!("Ignoring duplicate article declaration {:?}", article.id);
            return;
        }
        self.articles.push(article);
    }

    /// Registers a review at the front of the list, preserving the given
    /// id. Idempotent and non-persisting; this is the replay path for an
    /// exported overrides script.
    pub fn load_review(&mut self, review: Review) {
        if self.reviews.iter().any(|r| r.id == review.id) {
            debug!("Ignoring duplicate review declaration {:?}", review.id);
            return;
        }
        self.reviews.insert(0, review);
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Flips the project's membership in the hidden-projects set and
    /// persists the set. Independent of the blog toggle below, even though
    /// a project's blog post shares the same backing id.
    pub fn toggle_project_visibility(&mut self, id: &str) {
        toggle_membership(&mut self.hidden_projects, id);
        write_slice(
            self.storage.as_mut(),
            HIDDEN_PROJECTS_KEY,
            &self.hidden_projects,
        );
    }

    /// Flips membership in the hidden-blogs set and persists it. The id is
    /// a project id when hiding a project's blog post, or an article id
    /// when hiding a standalone article.
    pub fn toggle_blog_visibility(&mut self, id: &str) {
        toggle_membership(&mut self.hidden_blogs, id);
        write_slice(self.storage.as_mut(), HIDDEN_BLOGS_KEY, &self.hidden_blogs);
    }

    /// Replaces the in-memory hidden-projects set without persisting.
    ///
    /// Used when applying a published baseline; persisting here would let
    /// an imported snapshot silently overwrite this session's local edits.
    /// Re-export to make the imported state the new local baseline.
    pub fn set_hidden_projects(&mut self, ids: Vec<String>) {
        self.hidden_projects = ids;
    }

    /// Replaces the in-memory hidden-blogs set without persisting. Same
    /// contract as [`ContentStore::set_hidden_projects`].
    pub fn set_hidden_blogs(&mut self, ids: Vec<String>) {
        self.hidden_blogs = ids;
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Removes a project and its derived blog post from memory. Hidden
    /// flags are left in place; re-ingesting the same id later re-inherits
    /// them.
    pub fn delete_project(&mut self, id: &str) {
        self.projects.retain(|p| p.id != id);
        self.project_posts.retain(|post| post.project_id != id);
    }

    /// Removes the feed entry behind a blog id, whichever kind it names:
    /// a derived post whose project id matches, or an article whose own id
    /// matches. At most one of the two exists for any given id.
    pub fn delete_blog(&mut self, id: &str) {
        self.project_posts.retain(|post| post.project_id != id);
        self.articles.retain(|article| article.id != id);
    }

    /// Removes an admin-created article from the persisted slice and from
    /// the live feed.
    pub fn delete_custom_article(&mut self, id: &str) {
        self.custom_articles.retain(|article| article.id != id);
        write_slice(
            self.storage.as_mut(),
            CUSTOM_ARTICLES_KEY,
            &self.custom_articles,
        );
        self.delete_blog(id);
    }

    // ------------------------------------------------------------------
    // Admin-created content
    // ------------------------------------------------------------------

    /// Adds a review at the front of the list and persists the collection.
    /// Returns the generated id.
    pub fn add_review(&mut self, draft: ReviewDraft) -> String {
        let id = self.fresh_id(CUSTOM_REVIEW_PREFIX, |store, candidate| {
            store.reviews.iter().any(|r| r.id == candidate)
        });
        self.reviews.insert(
            0,
            Review {
                id: id.clone(),
                client: draft.client,
                role: draft.role,
                text: draft.text,
            },
        );
        write_slice(self.storage.as_mut(), CUSTOM_REVIEWS_KEY, &self.reviews);
        id
    }

    /// Removes a review by id and persists the collection. Ids are
    /// canonical text by the time they are stored, so a numeric-looking
    /// default id and a generated `rev_*` id never shadow each other.
    pub fn delete_review(&mut self, id: &str) {
        self.reviews.retain(|review| review.id != id);
        write_slice(self.storage.as_mut(), CUSTOM_REVIEWS_KEY, &self.reviews);
    }

    /// Creates an article from the admin surface: persisted in the custom
    /// slice and entered into the live feed. Returns the generated id.
    pub fn add_article(&mut self, draft: ArticleDraft) -> String {
        let id = self.fresh_id(CUSTOM_ARTICLE_PREFIX, |store, candidate| {
            store.articles.iter().any(|a| a.id == candidate)
                || store.custom_articles.iter().any(|a| a.id == candidate)
        });
        let article = Article {
            id: id.clone(),
            project_id: draft.project_id,
            title: draft.title,
            date: draft.date,
            excerpt: draft.excerpt,
            content: draft.content,
            image: draft.image,
        };
        self.custom_articles.push(article.clone());
        write_slice(
            self.storage.as_mut(),
            CUSTOM_ARTICLES_KEY,
            &self.custom_articles,
        );
        self.load_article(article);
        id
    }

    /// Time-derived id with a bump-on-collision guard, so two creations in
    /// the same millisecond still get distinct ids.
    fn fresh_id(&self, prefix: &str, taken: impl Fn(&Self, &str) -> bool) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let candidate = format!("{prefix}{stamp}");
            if !taken(self, &candidate) {
                return candidate;
            }
            stamp += 1;
        }
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// All loaded projects, annotated with their hidden flag.
    pub fn projects(&self) -> Vec<ProjectView> {
        self.projects
            .iter()
            .map(|project| ProjectView {
                hidden: self.hidden_projects.iter().any(|id| id == &project.id),
                project: project.clone(),
            })
            .collect()
    }

    /// Looks up a loaded project by id. `None` for dangling links.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// The unified blog feed: derived project posts and standalone
    /// articles, most recent first. The sort is stable, so same-date
    /// entries keep their ingestion order.
    pub fn blog_feed(&self) -> Vec<FeedEntry> {
        let mut entries =
            Vec::with_capacity(self.project_posts.len() + self.articles.len());
        for post in &self.project_posts {
            entries.push(FeedEntry {
                kind: FeedKind::Project,
                id: post.project_id.clone(),
                project_id: Some(post.project_id.clone()),
                title: post.title.clone(),
                date: post.date.clone(),
                excerpt: post.excerpt.clone(),
                content: post.content.clone(),
                image: post.image.clone(),
                hidden: self.hidden_blogs.iter().any(|id| id == &post.project_id),
            });
        }
        for article in &self.articles {
            entries.push(FeedEntry {
                kind: FeedKind::Article,
                id: article.id.clone(),
                project_id: article.project_id.clone(),
                title: article.title.clone(),
                date: article.date.clone(),
                excerpt: article.excerpt.clone(),
                content: article.content.clone(),
                image: article.image.clone(),
                hidden: self.hidden_blogs.iter().any(|id| id == &article.id),
            });
        }
        entries.sort_by_cached_key(|entry| std::cmp::Reverse(parse_feed_date(&entry.date)));
        entries
    }

    /// All reviews, admin-created ones first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Admin-created reviews only, judged by id shape.
    pub fn custom_reviews(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(|review| review.is_custom())
    }

    /// The persisted admin-created article slice.
    pub fn custom_articles(&self) -> &[Article] {
        &self.custom_articles
    }

    /// Current hidden-projects set, in insertion order.
    pub fn hidden_project_ids(&self) -> &[String] {
        &self.hidden_projects
    }

    /// Current hidden-blogs set, in insertion order.
    pub fn hidden_blog_ids(&self) -> &[String] {
        &self.hidden_blogs
    }

    /// Read access to the backing storage, e.g. for the session gate.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}

fn toggle_membership(set: &mut Vec<String>, id: &str) {
    if let Some(position) = set.iter().position(|member| member == id) {
        set.remove(position);
    } else {
        set.push(id.to_owned());
    }
}
