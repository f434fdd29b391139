//! CLI commands

pub mod clean;
pub mod export;
pub mod filter;
pub mod list;
pub mod new;
pub mod search;
pub mod show;

use crate::content::Post;
use crate::helpers;
use crate::Blog;

/// One-line summary of a post for terminal output
fn post_line(blog: &Blog, post: &Post) -> String {
    let mut line = format!(
        "  {} - {} [{}]",
        helpers::display_date(post.date.as_ref(), &blog.config.date_format),
        post.title,
        post.slug
    );
    if !post.category.is_empty() {
        line.push_str(&format!(" ({})", post.category));
    }
    if post.featured {
        line.push_str(" *");
    }
    line
}

/// Print a titled list of posts
fn print_posts(blog: &Blog, heading: &str, posts: &[&Post]) {
    println!("{} ({}):", heading, posts.len());
    for post in posts {
        println!("{}", post_line(blog, post));
    }
}
