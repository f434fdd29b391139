//! Remove exported page data

use anyhow::Result;
use std::fs;

use super::export::output_dir;
use crate::Blog;

/// Delete the exported blog directory and taxonomy listings
pub fn run(blog: &Blog) -> Result<()> {
    let config = &blog.config;
    let dirs = [
        output_dir(blog),
        blog.public_dir.join(config.category_dir.trim_matches('/')),
        blog.public_dir.join(config.tag_dir.trim_matches('/')),
    ];

    for dir in dirs {
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            tracing::info!("Deleted: {:?}", dir);
        }
    }

    Ok(())
}
