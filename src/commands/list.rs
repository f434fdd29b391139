//! List blog content

use anyhow::Result;

use super::print_posts;
use crate::Blog;

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let index = blog.index()?;

    match content_type {
        "post" | "posts" => {
            let posts: Vec<_> = index.posts().iter().collect();
            print_posts(blog, "Posts", &posts);
        }
        "featured" => {
            print_posts(blog, "Featured", &index.featured(None));
        }
        "tag" | "tags" => {
            let tags = index.tag_counts();
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  #{} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = index.category_counts();
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, featured, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
