//! blogkit: a Markdown blog content index
//!
//! Loads posts from a directory of front-matter Markdown files and answers
//! the queries a blog front end needs: listings by category and tag,
//! featured posts, search, related posts and a conjunctive client filter.

pub mod commands;
pub mod config;
pub mod content;
pub mod filter;
pub mod helpers;
pub mod page;

use anyhow::Result;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

use content::{ContentIndex, ContentLoader, MarkdownRenderer};
use page::{ListingPage, PostPage};

/// A blog rooted at a site directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Export (output) directory
    pub public_dir: PathBuf,
    timezone: Option<Tz>,
}

impl Blog {
    /// Create a new blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create a blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let timezone = config.timezone()?;
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            timezone,
        })
    }

    /// Loader for the content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir).with_timezone(self.timezone)
    }

    /// Build a fresh index of every post
    pub fn index(&self) -> Result<ContentIndex> {
        ContentIndex::load(self.loader())
    }

    /// Markdown renderer configured for this blog
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config)
    }

    /// Main listing page
    pub fn blog_page(&self) -> Result<ListingPage> {
        Ok(ListingPage::blog(&self.config, &self.index()?))
    }

    /// Single post page; `Ok(None)` for an unknown slug
    pub fn post_page(&self, slug: &str) -> Result<Option<PostPage>> {
        let index = self.index()?;
        PostPage::build(&self.config, &index, &self.renderer(), slug)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }

    /// Export page data
    pub fn export(&self) -> Result<()> {
        commands::export::run(self).map(|_| ())
    }

    /// Remove exported page data
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
