//! Table of contents entries and heading anchors

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref NON_ID_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fff}\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One heading in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Anchor id written onto the heading tag
    pub id: String,
    pub text: String,
    /// Heading level, 1 to 6
    pub level: u8,
}

/// Anchor id for a heading: lowercased, punctuation stripped, whitespace runs
/// replaced by `-`. Only ASCII word characters and CJK ideographs are kept.
pub fn heading_id(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_ID_CHARS.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), "-").into_owned()
}

/// Hands out unique heading ids, suffixing repeats with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    next_suffix: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl IdAllocator {
    pub fn allocate(&mut self, base: String) -> String {
        let mut id = base.clone();
        let suffix = self.next_suffix.entry(base.clone()).or_insert(0);
        // Skip suffixes already claimed by a literal heading such as "Intro 1"
        while self.taken.contains(&id) {
            *suffix += 1;
            id = format!("{}-{}", base, suffix);
        }
        self.taken.insert(id.clone());
        id
    }
}
