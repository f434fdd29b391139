//! Related-post ranking

use super::Post;

/// Points for sharing the target's category
pub const CATEGORY_SCORE: u32 = 3;
/// Points for each of the candidate's tags that the target also carries
pub const TAG_SCORE: u32 = 2;

/// Relevance of `candidate` to `target`
pub fn relevance(target: &Post, candidate: &Post) -> u32 {
    let mut score = 0;

    if candidate.category == target.category {
        score += CATEGORY_SCORE;
    }

    let shared = candidate
        .tags
        .iter()
        .filter(|tag| target.has_tag(tag))
        .count() as u32;

    score + shared * TAG_SCORE
}

/// Rank every post other than `target` by relevance and keep the best `limit`.
///
/// `posts` is expected newest first; equal scores keep that order. Zero-score
/// posts are still returned when there are not enough relevant ones.
pub fn related<'a>(posts: &'a [Post], target: &Post, limit: usize) -> Vec<&'a Post> {
    let mut scored: Vec<(&Post, u32)> = posts
        .iter()
        .filter(|post| post.slug != target.slug)
        .map(|post| (post, relevance(target, post)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(limit)
        .map(|(post, _)| post)
        .collect()
}
