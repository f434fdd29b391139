//! Page-layer payloads built from the content index
//!
//! These are the records handed to presentation code: one [`ListingPage`]
//! per blog, category and tag listing, and one [`PostPage`] per post.

use serde::Serialize;

use crate::config::BlogConfig;
use crate::content::{ContentIndex, MarkdownRenderer, Post, TocItem};
use crate::helpers;

/// A category or tag with its listing URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
    pub count: usize,
    pub url: String,
}

/// Blog, category or tag listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub page_title: String,
    pub page_description: String,
    pub posts: Vec<Post>,
    pub categories: Vec<Term>,
    pub tags: Vec<Term>,
    pub featured_posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_tag: Option<String>,
}

/// Single post view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub post: Post,
    pub url: String,
    /// Rendered body
    pub html: String,
    pub toc: Vec<TocItem>,
    pub related_posts: Vec<Post>,
}

pub fn category_terms(config: &BlogConfig, index: &ContentIndex) -> Vec<Term> {
    index
        .category_counts()
        .into_iter()
        .map(|(name, count)| Term {
            name: name.to_string(),
            count,
            url: helpers::category_url(config, name),
        })
        .collect()
}

pub fn tag_terms(config: &BlogConfig, index: &ContentIndex) -> Vec<Term> {
    index
        .tag_counts()
        .into_iter()
        .map(|(name, count)| Term {
            name: name.to_string(),
            count,
            url: helpers::tag_url(config, name),
        })
        .collect()
}

fn owned(posts: Vec<&Post>) -> Vec<Post> {
    posts.into_iter().cloned().collect()
}

impl ListingPage {
    fn with_posts(config: &BlogConfig, index: &ContentIndex, posts: Vec<&Post>) -> Self {
        Self {
            page_title: config.title.clone(),
            page_description: config.description.clone(),
            posts: owned(posts),
            categories: category_terms(config, index),
            tags: tag_terms(config, index),
            featured_posts: owned(index.featured(Some(config.featured_limit))),
            initial_category: None,
            initial_tag: None,
        }
    }

    /// The main blog listing
    pub fn blog(config: &BlogConfig, index: &ContentIndex) -> Self {
        Self::with_posts(config, index, index.posts().iter().collect())
    }

    /// Listing for one category; `None` when no post is in it
    pub fn category(config: &BlogConfig, index: &ContentIndex, category: &str) -> Option<Self> {
        let posts = index.by_category(category);
        if posts.is_empty() {
            return None;
        }
        let mut page = Self::with_posts(config, index, posts);
        page.page_title = format!("Category: {}", category);
        page.page_description = format!("Browse all articles in the {} category", category);
        page.initial_category = Some(category.to_string());
        Some(page)
    }

    /// Listing for one tag; `None` when no post carries it
    pub fn tag(config: &BlogConfig, index: &ContentIndex, tag: &str) -> Option<Self> {
        let posts = index.by_tag(tag);
        if posts.is_empty() {
            return None;
        }
        let mut page = Self::with_posts(config, index, posts);
        page.page_title = format!("Tag: #{}", tag);
        page.page_description = format!("Browse all articles tagged with #{}", tag);
        page.initial_tag = Some(tag.to_string());
        Some(page)
    }
}

impl PostPage {
    /// Build the view for `slug`; `Ok(None)` when the post does not exist
    pub fn build(
        config: &BlogConfig,
        index: &ContentIndex,
        renderer: &MarkdownRenderer,
        slug: &str,
    ) -> anyhow::Result<Option<Self>> {
        let Some(post) = index.get_by_slug(slug)? else {
            return Ok(None);
        };

        let rendered = renderer.render(post.content.as_deref().unwrap_or_default());
        let related_posts = owned(index.related(&post, config.related_limit));
        let toc = if config.toc.enable {
            rendered.toc
        } else {
            Vec::new()
        };

        Ok(Some(Self {
            url: helpers::post_url(config, &post.slug),
            post,
            html: rendered.html,
            toc,
            related_posts,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ContentIndex) {
        let tmp = TempDir::new().unwrap();
        let posts = [
            (
                "react-hooks",
                "title: React Hooks Guide\ndate: 2024-03-01\ncategory: Tech\ntags: [react, ts]\nfeatured: true",
                "# Intro\n\nHooks!\n\n## useEffect\n",
            ),
            (
                "css-grid",
                "title: CSS Grid\ndate: 2024-02-01\ncategory: Tech\ntags: [ts, css]",
                "Grid body",
            ),
            (
                "kyoto",
                "title: Kyoto Trip\ndate: 2024-01-01\ncategory: Life Style",
                "Travel body",
            ),
        ];
        for (slug, fm, body) in posts {
            fs::write(
                tmp.path().join(format!("{}.md", slug)),
                format!("---\n{}\n---\n{}", fm, body),
            )
            .unwrap();
        }
        let index = ContentIndex::load(ContentLoader::new(tmp.path())).unwrap();
        (tmp, index)
    }

    #[test]
    fn test_blog_listing() {
        let (_tmp, index) = fixture();
        let config = BlogConfig::default();
        let page = ListingPage::blog(&config, &index);

        assert_eq!(page.posts.len(), 3);
        assert_eq!(page.featured_posts.len(), 1);
        assert_eq!(page.categories[0].name, "Tech");
        assert_eq!(page.categories[0].count, 2);
        assert_eq!(page.categories[1].url, "/blog/category/Life%20Style/");
        assert!(page.initial_category.is_none());
    }

    #[test]
    fn test_category_and_tag_listing() {
        let (_tmp, index) = fixture();
        let config = BlogConfig::default();

        let page = ListingPage::category(&config, &index, "Life Style").unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.page_title, "Category: Life Style");
        assert_eq!(page.initial_category.as_deref(), Some("Life Style"));
        assert!(ListingPage::category(&config, &index, "Missing").is_none());

        let page = ListingPage::tag(&config, &index, "ts").unwrap();
        assert_eq!(page.posts.len(), 2);
        assert!(ListingPage::tag(&config, &index, "nope").is_none());

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["initialTag"], "ts");
        assert!(json.get("initialCategory").is_none());
    }

    #[test]
    fn test_post_page() {
        let (_tmp, index) = fixture();
        let config = BlogConfig::default();
        let renderer = MarkdownRenderer::from_config(&config);

        let page = PostPage::build(&config, &index, &renderer, "react-hooks")
            .unwrap()
            .unwrap();
        assert_eq!(page.post.slug, "react-hooks");
        assert_eq!(page.url, "/blog/react-hooks/");
        assert!(page.html.contains(r#"<h2 id="useeffect">useEffect</h2>"#));
        assert_eq!(page.toc.len(), 2);
        let related: Vec<_> = page.related_posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["css-grid", "kyoto"]);

        assert!(PostPage::build(&config, &index, &renderer, "missing")
            .unwrap()
            .is_none());
    }
}
