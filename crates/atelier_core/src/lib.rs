//! Atelier core: in-memory content store and feed aggregation.
mod feed;
mod model;
mod storage;
mod store;

pub use feed::{parse_feed_date, FeedEntry, FeedKind};
pub use model::{
    default_reviews, Article, ArticleDraft, BlogSeed, Project, ProjectBlogPost, Review,
    ReviewDraft, CUSTOM_ARTICLE_PREFIX, CUSTOM_REVIEW_PREFIX,
};
pub use storage::{
    MemoryStorage, Storage, AUTH_KEY, CUSTOM_ARTICLES_KEY, CUSTOM_REVIEWS_KEY, HIDDEN_BLOGS_KEY,
    HIDDEN_PROJECTS_KEY,
};
pub use store::{ContentStore, ProjectView};
