//! Show a single post

use anyhow::Result;

use super::post_line;
use crate::helpers;
use crate::Blog;

/// Print a post's metadata, table of contents and related posts, or its HTML
pub fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    let Some(page) = blog.post_page(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if html {
        println!("{}", page.html);
        return Ok(());
    }

    let post = &page.post;
    println!("{}", post.title);
    println!(
        "  Date:     {}",
        helpers::display_date(post.date.as_ref(), &blog.config.date_format)
    );
    if !post.author.is_empty() {
        println!("  Author:   {}", post.author);
    }
    if !post.category.is_empty() {
        println!("  Category: {}", post.category);
    }
    if !post.tags.is_empty() {
        let tags: Vec<_> = post.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("  Tags:     {}", tags.join(" "));
    }
    println!("  URL:      {}", page.url);
    if !post.excerpt.is_empty() {
        println!("\n{}", post.excerpt);
    }

    if !page.toc.is_empty() {
        println!("\nContents:");
        for item in &page.toc {
            let indent = "  ".repeat(item.level as usize);
            println!("{}{} (#{})", indent, item.text, item.id);
        }
    }

    if !page.related_posts.is_empty() {
        println!("\nRelated ({}):", page.related_posts.len());
        for related in &page.related_posts {
            println!("{}", post_line(blog, related));
        }
    }

    Ok(())
}
