//! Filter posts

use anyhow::Result;

use super::print_posts;
use crate::filter::FilterState;
use crate::Blog;

/// Print the posts visible under `state`, plus the featured section when no
/// filter is active
pub fn run(blog: &Blog, state: &FilterState) -> Result<()> {
    let index = blog.index()?;

    if !state.is_active() {
        let featured = index.featured(Some(blog.config.featured_limit));
        if !featured.is_empty() {
            print_posts(blog, "Featured", &featured);
            println!();
        }
    }

    let visible = state.apply(index.posts());
    print_posts(blog, "Posts", &visible);
    Ok(())
}
