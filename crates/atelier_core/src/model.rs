use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Id prefix for reviews created through the admin surface.
///
/// Seeded default reviews carry small numeric ids; anything starting with
/// this prefix is treated as user-created when building an export.
pub const CUSTOM_REVIEW_PREFIX: &str = "rev_";

/// Id prefix for articles created through the admin surface.
pub const CUSTOM_ARTICLE_PREFIX: &str = "art_";

/// A portfolio entry for a completed or conceptual architectural work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Slug identifying the project, unique within the loaded set.
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub is_ethosphere: bool,
    #[serde(default)]
    pub is_conceptual: bool,
    /// Optional embedded blog content; presence derives a feed entry.
    #[serde(default)]
    pub blog: Option<BlogSeed>,
}

/// Blog content embedded in a project declaration.
///
/// Optional fields fall back to the parent project when the derived feed
/// entry is built: `title` to the project title, `excerpt` to the project
/// description, the image always to the project image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSeed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
}

/// A blog-feed entry derived from a project's embedded blog content.
///
/// Never persisted on its own; it is rebuilt from the project at load time
/// and removed together with the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBlogPost {
    pub project_id: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
}

impl ProjectBlogPost {
    /// Derives the feed entry for `project`, applying the field fallbacks.
    pub fn from_seed(project: &Project, seed: &BlogSeed) -> Self {
        Self {
            project_id: project.id.clone(),
            title: seed.title.clone().unwrap_or_else(|| project.title.clone()),
            date: seed.date.clone().unwrap_or_default(),
            excerpt: seed
                .excerpt
                .clone()
                .unwrap_or_else(|| project.description.clone()),
            content: seed.content.clone(),
            image: project.image.clone(),
        }
    }
}

/// A standalone editorial post, optionally linked to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    /// Cross-navigation link only; a dangling id renders standalone.
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
}

/// Fields for an article created through the admin surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub project_id: Option<String>,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
}

/// A client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Canonical textual id. Persisted defaults may arrive as JSON numbers;
    /// they are normalized to text on the way in.
    #[serde(deserialize_with = "deserialize_loose_id")]
    pub id: String,
    pub client: String,
    pub role: String,
    pub text: String,
}

impl Review {
    /// Whether this review was created through the admin surface, judged by
    /// id shape: generated ids carry the `rev_` prefix, seeded defaults are
    /// small integers.
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_REVIEW_PREFIX)
    }
}

/// Fields for a review created through the admin surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub client: String,
    pub role: String,
    pub text: String,
}

/// The testimonials seeded on first run.
pub fn default_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".to_owned(),
            client: "Elena Marchetti".to_owned(),
            role: "Private client, Villa Serrana".to_owned(),
            text: "The studio understood the site better than we did. Every \
                   room frames the valley exactly as promised in the first \
                   sketch."
                .to_owned(),
        },
        Review {
            id: "2".to_owned(),
            client: "Tomas Lindqvist".to_owned(),
            role: "Director, Nordhaven Development".to_owned(),
            text: "Delivered a complex mixed-use programme on a tight urban \
                   plot without losing a single day to redesign."
                .to_owned(),
        },
        Review {
            id: "3".to_owned(),
            client: "Priya Raghavan".to_owned(),
            role: "Curator, City Gallery Annex".to_owned(),
            text: "Light, circulation, and restraint. The annex disappears \
                   into the old building until you look up."
                .to_owned(),
        },
    ]
}

/// Accepts an id encoded either as a string or as a bare number and
/// canonicalizes it to text. Legacy persisted defaults use numeric ids.
fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or numeric id")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_owned())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
