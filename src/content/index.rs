//! In-memory blog index and metadata queries

use anyhow::Result;
use indexmap::IndexSet;

use super::loader::ContentLoader;
use super::{related, Post};

/// Snapshot of every post in the content directory, newest first.
///
/// Each [`ContentIndex::load`] reads the directory fresh; nothing is cached
/// between loads.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    loader: ContentLoader,
    posts: Vec<Post>,
}

impl ContentIndex {
    /// Build the index from the loader's directory
    pub fn load(loader: ContentLoader) -> Result<Self> {
        let posts = loader.load_posts()?;
        tracing::debug!("Indexed {} posts from {:?}", posts.len(), loader.dir());
        Ok(Self { loader, posts })
    }

    /// Build an index over posts that are already in memory
    pub fn from_posts(loader: ContentLoader, mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { loader, posts }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Consume the index, returning the posts
    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// A single post with its markdown body, read fresh from disk
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.loader.load_post(slug)
    }

    /// Featured posts, newest first, truncated to `limit` when given
    pub fn featured(&self, limit: Option<usize>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.featured)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Posts whose category equals `category` exactly
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.category == category)
            .collect()
    }

    /// Posts carrying `tag`
    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|post| post.has_tag(tag)).collect()
    }

    /// Distinct non-empty categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let categories: IndexSet<&str> = self
            .posts
            .iter()
            .map(|post| post.category.as_str())
            .filter(|category| !category.is_empty())
            .collect();
        categories.into_iter().collect()
    }

    /// Distinct non-empty tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let tags: IndexSet<&str> = self
            .posts
            .iter()
            .flat_map(|post| post.tags.iter().map(String::as_str))
            .filter(|tag| !tag.is_empty())
            .collect();
        tags.into_iter().collect()
    }

    /// Number of posts per category, in first-seen order
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        self.categories()
            .into_iter()
            .map(|category| (category, self.by_category(category).len()))
            .collect()
    }

    /// Number of posts per tag, in first-seen order
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        self.tags()
            .into_iter()
            .map(|tag| (tag, self.by_tag(tag).len()))
            .collect()
    }

    /// Case-insensitive substring search over title, excerpt and tags
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = query.to_lowercase();
        self.posts
            .iter()
            .filter(|post| post.matches_lowercase(&needle))
            .collect()
    }

    /// Posts most related to `post`, best first
    pub fn related(&self, post: &Post, limit: usize) -> Vec<&Post> {
        related::related(&self.posts, post, limit)
    }
}
