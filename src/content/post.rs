//! Post data model

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, the source file name without `.md`
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publish date, `None` when missing or unparseable
    pub date: Option<DateTime<FixedOffset>>,

    /// Short summary shown on cards
    pub excerpt: String,

    /// Single category, empty when unset
    pub category: String,

    /// Tags in display order
    pub tags: Vec<String>,

    pub author: String,

    /// Whether the post shows up in the featured section
    pub featured: bool,

    /// Cover image path or URL
    pub image: String,

    /// Raw markdown body, only present for single-post lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// Build a post from parsed front-matter
    pub fn from_front_matter(slug: impl Into<String>, fm: FrontMatter, tz: Option<Tz>) -> Self {
        let date = fm.parse_date(tz);
        if date.is_none() {
            if let Some(raw) = &fm.date {
                tracing::debug!("Unparseable date {:?}, leaving post undated", raw);
            }
        }

        Self {
            slug: slug.into(),
            title: fm.title,
            date,
            excerpt: fm.excerpt,
            category: fm.category,
            tags: fm.tags,
            author: fm.author,
            featured: fm.featured,
            image: fm.image,
            content: None,
        }
    }

    /// Attach the markdown body
    pub fn with_content(mut self, body: impl Into<String>) -> Self {
        self.content = Some(body.into());
        self
    }

    /// Whether the post carries `tag` (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match against title, excerpt and tags.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Case-insensitive free-text match against title, excerpt and tags
    pub fn matches_query(&self, query: &str) -> bool {
        self.matches_lowercase(&query.to_lowercase())
    }
}
