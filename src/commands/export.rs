//! Export page data as JSON

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content::{ContentIndex, MarkdownRenderer, Post};
use crate::page::{self, ListingPage, PostPage};
use crate::Blog;

/// Counts of what an export wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub posts: usize,
    pub categories: usize,
    pub tags: usize,
}

/// Directory receiving the blog's page data
pub fn output_dir(blog: &Blog) -> PathBuf {
    blog.public_dir.join(blog.config.blog_dir.trim_matches('/'))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Directory name for a slug, category or tag.
///
/// Names are written unencoded so a static server that decodes the request
/// path finds them. Names that would leave the parent directory are refused.
fn dir_segment(name: &str) -> Option<&str> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if !plain {
        tracing::warn!("Skipping unsafe directory name {:?}", name);
    }
    plain.then_some(name)
}

/// Write the listing, taxonomy and per-post JSON files
pub fn run(blog: &Blog) -> Result<ExportSummary> {
    let start = std::time::Instant::now();

    let index = blog.index()?;
    let renderer = blog.renderer();
    let config = &blog.config;
    let out = output_dir(blog);

    tracing::info!("Loaded {} posts", index.len());

    write_json(&out.join("index.json"), &ListingPage::blog(config, &index))?;
    write_json(&out.join("posts.json"), &index.posts())?;
    write_json(
        &out.join("featured.json"),
        &index.featured(Some(config.featured_limit)),
    )?;
    write_json(&out.join("categories.json"), &page::category_terms(config, &index))?;
    write_json(&out.join("tags.json"), &page::tag_terms(config, &index))?;

    for post in index.posts() {
        export_post(blog, &index, &renderer, post, &out)?;
    }

    let categories = index.categories();
    for category in &categories {
        let Some(name) = dir_segment(category) else {
            continue;
        };
        if let Some(listing) = ListingPage::category(config, &index, category) {
            let dir = blog
                .public_dir
                .join(config.category_dir.trim_matches('/'))
                .join(name);
            write_json(&dir.join("index.json"), &listing)?;
        }
    }

    let tags = index.tags();
    for tag in &tags {
        let Some(name) = dir_segment(tag) else {
            continue;
        };
        if let Some(listing) = ListingPage::tag(config, &index, tag) {
            let dir = blog
                .public_dir
                .join(config.tag_dir.trim_matches('/'))
                .join(name);
            write_json(&dir.join("index.json"), &listing)?;
        }
    }

    let summary = ExportSummary {
        posts: index.len(),
        categories: categories.len(),
        tags: tags.len(),
    };

    tracing::info!(
        "Exported {} posts, {} categories, {} tags in {:.2}s",
        summary.posts,
        summary.categories,
        summary.tags,
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

fn export_post(
    blog: &Blog,
    index: &ContentIndex,
    renderer: &MarkdownRenderer,
    post: &Post,
    out: &Path,
) -> Result<()> {
    let Some(name) = dir_segment(&post.slug) else {
        return Ok(());
    };
    match PostPage::build(&blog.config, index, renderer, &post.slug)? {
        Some(page) => write_json(&out.join(name).join("index.json"), &page),
        None => {
            // Removed between indexing and rendering
            tracing::warn!("Post {} disappeared during export", post.slug);
            Ok(())
        }
    }
}

/// Watch the content directory and re-export on changes
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if !blog.content_dir.exists() {
        fs::create_dir_all(&blog.content_dir)?;
    }
    debouncer
        .watcher()
        .watch(&blog.content_dir, RecursiveMode::NonRecursive)?;
    tracing::info!(
        "Watching {:?} for changes. Press Ctrl+C to stop.",
        blog.content_dir
    );

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| e.path.extension().is_some_and(|ext| ext == "md"))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("Changed: {}", event.path.display());
                }

                if let Err(e) = run(blog) {
                    tracing::error!("Export failed: {}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
