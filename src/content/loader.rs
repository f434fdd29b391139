//! Content loader - reads posts from the content directory

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};

/// Reads blog posts from a flat directory of markdown files
#[derive(Debug, Clone)]
pub struct ContentLoader {
    dir: PathBuf,
    timezone: Option<Tz>,
}

impl ContentLoader {
    /// Create a loader for `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            timezone: None,
        }
    }

    /// Interpret front-matter dates without an offset in `tz`
    pub fn with_timezone(mut self, tz: Option<Tz>) -> Self {
        self.timezone = tz;
        self
    }

    /// The content directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every post's metadata, newest first.
    ///
    /// A missing directory yields no posts. Entries that cannot be read,
    /// such as dangling symlinks, are skipped with a warning.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        if !self.dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(slug) = slug_from_path(path) else {
                continue;
            };

            match read_lossy(path) {
                Ok(content) => {
                    let (fm, _body) = FrontMatter::parse_lenient(&content);
                    tracing::debug!("Loaded post {}", slug);
                    posts.push(Post::from_front_matter(slug, fm, self.timezone));
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Newest first; undated posts sink to the end. Stable, so ties keep file-name order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load one post with its markdown body.
    ///
    /// Returns `Ok(None)` when no `<slug>.md` file exists or it is not a
    /// regular file.
    pub fn load_post(&self, slug: &str) -> Result<Option<Post>> {
        if !is_plain_slug(slug) {
            return Ok(None);
        }

        let path = self.dir.join(format!("{}.md", slug));
        if !path.is_file() {
            return Ok(None);
        }
        let content = match read_lossy(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", path)),
        };

        let (fm, body) = FrontMatter::parse_lenient(&content);
        Ok(Some(
            Post::from_front_matter(slug, fm, self.timezone).with_content(body),
        ))
    }
}

/// Read a file as text, replacing invalid UTF-8 sequences
fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Slug for a markdown file: its name with the `.md` extension stripped
fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let slug = name.strip_suffix(".md")?;
    (!slug.is_empty()).then(|| slug.to_string())
}

/// A slug must name a file directly inside the content directory
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.contains('\0')
}
