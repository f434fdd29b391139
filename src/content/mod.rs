//! Content module - front-matter parsing, post loading, indexing and rendering

mod frontmatter;
mod index;
pub mod loader;
mod markdown;
pub(crate) mod post;
pub mod related;
mod toc;

pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use index::ContentIndex;
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, Rendered};
pub use post::Post;
pub use toc::{heading_id, TocItem};
