//! Search posts

use anyhow::Result;

use super::print_posts;
use crate::Blog;

/// Print posts whose title, excerpt or tags contain `query`
pub fn run(blog: &Blog, query: &str) -> Result<()> {
    let index = blog.index()?;
    let results = index.search(query);
    tracing::debug!("Search {:?} matched {} of {} posts", query, results.len(), index.len());
    print_posts(blog, &format!("Results for {:?}", query), &results);
    Ok(())
}
