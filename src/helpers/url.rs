//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::BlogConfig;

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/hello/") // -> "/site/blog/hello/"
/// ```
pub fn url_for(config: &BlogConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &BlogConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

fn join_dir(dir: &str, segment: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        format!("{}/", segment)
    } else {
        format!("{}/{}/", dir, segment)
    }
}

/// Site path of a post page
pub fn post_url(config: &BlogConfig, slug: &str) -> String {
    url_for(config, &join_dir(&config.blog_dir, &encode_segment(slug)))
}

/// Site path of a category listing
pub fn category_url(config: &BlogConfig, category: &str) -> String {
    url_for(config, &join_dir(&config.category_dir, &encode_segment(category)))
}

/// Site path of a tag listing
pub fn tag_url(config: &BlogConfig, tag: &str) -> String {
    url_for(config, &join_dir(&config.tag_dir, &encode_segment(tag)))
}
