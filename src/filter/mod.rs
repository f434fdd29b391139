//! Client-side post filter
//!
//! A [`FilterState`] holds four optional predicates (free text, category,
//! tag, date range). A post is visible when it satisfies every active one.

mod range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::Post;

pub use range::DateRange;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown date range {0:?} (expected all, last-week, last-month, last-3-months or last-year)")]
    UnknownDateRange(String),
}

/// Filter selections; every field defaults to "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text query, empty for none
    pub query: String,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub date_range: Option<DateRange>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    fn selected_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn selected_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    fn selected_range(&self) -> Option<DateRange> {
        self.date_range.filter(|range| *range != DateRange::All)
    }

    /// Whether any predicate is active; a range of `all` does not count
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.selected_category().is_some()
            || self.selected_tag().is_some()
            || self.selected_range().is_some()
    }

    /// Reset every predicate
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `post` passes every active predicate, measuring post age from `now`
    pub fn matches(&self, post: &Post, now: DateTime<Utc>) -> bool {
        self.matches_query(post)
            && self.matches_category(post)
            && self.matches_tag(post)
            && self.matches_date(post, now)
    }

    fn matches_query(&self, post: &Post) -> bool {
        self.query.is_empty() || post.matches_query(&self.query)
    }

    fn matches_category(&self, post: &Post) -> bool {
        self.selected_category()
            .map_or(true, |category| post.category == category)
    }

    fn matches_tag(&self, post: &Post) -> bool {
        self.selected_tag().map_or(true, |tag| post.has_tag(tag))
    }

    fn matches_date(&self, post: &Post, now: DateTime<Utc>) -> bool {
        let Some(max_age) = self.selected_range().and_then(DateRange::max_age) else {
            return true;
        };
        // Undated posts never fall inside a range
        post.date.map_or(false, |date| {
            now.signed_duration_since(date.with_timezone(&Utc)) <= max_age
        })
    }

    /// Filter against the current wall-clock time.
    ///
    /// "Now" is taken at each call, so the same state can admit different
    /// posts as time passes.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        filter_posts(posts, self, Utc::now())
    }
}

/// Posts satisfying every active predicate of `state`, in input order
pub fn filter_posts<'a>(posts: &'a [Post], state: &FilterState, now: DateTime<Utc>) -> Vec<&'a Post> {
    posts.iter().filter(|post| state.matches(post, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::fixtures::post;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
    }

    fn dated(slug: &str, days_ago: i64) -> Post {
        let mut p = post(slug, 1, "Tech", &[]);
        p.date = Some((now() - Duration::days(days_ago)).fixed_offset());
        p
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    fn sample() -> Vec<Post> {
        let mut guide = post("guide", 30, "Tech", &["react", "ts"]);
        guide.title = "React Hooks Guide".to_string();
        let mut trip = post("trip", 20, "Life", &["travel"]);
        trip.excerpt = "A week in Kyoto".to_string();
        let mut css = post("css", 10, "Tech", &["css", "ts"]);
        css.title = "Grid tricks".to_string();
        vec![guide, trip, css]
    }

    #[test]
    fn test_default_state_passes_everything() {
        let posts = sample();
        let state = FilterState::default();
        assert!(!state.is_active());
        assert_eq!(filter_posts(&posts, &state, now()).len(), 3);
    }

    #[test]
    fn test_query_matches_title_excerpt_and_tags() {
        let posts = sample();
        let by = |q: &str| slugs(&filter_posts(&posts, &FilterState::new().with_query(q), now()));

        assert_eq!(by("hooks"), vec!["guide"]);
        assert_eq!(by("KYOTO"), vec!["trip"]);
        assert_eq!(by("ts"), vec!["guide", "css"]);
        assert!(by("life").is_empty());
    }

    #[test]
    fn test_category_and_tag_are_exact() {
        let posts = sample();
        let state = FilterState::new().with_category("Tech");
        assert_eq!(slugs(&filter_posts(&posts, &state, now())), vec!["guide", "css"]);

        let state = FilterState::new().with_category("tech");
        assert!(filter_posts(&posts, &state, now()).is_empty());

        let state = FilterState::new().with_tag("css");
        assert_eq!(slugs(&filter_posts(&posts, &state, now())), vec!["css"]);
    }

    #[test]
    fn test_empty_selections_are_inactive() {
        let posts = sample();
        let state = FilterState::new().with_category("").with_tag("");
        assert!(!state.is_active());
        assert_eq!(filter_posts(&posts, &state, now()).len(), 3);

        let state = FilterState::new().with_date_range(DateRange::All);
        assert!(!state.is_active());
    }

    #[test]
    fn test_last_week_range() {
        let posts = vec![dated("ten-days", 10), dated("three-days", 3)];
        let state = FilterState::new().with_date_range(DateRange::LastWeek);
        assert_eq!(slugs(&filter_posts(&posts, &state, now())), vec!["three-days"]);

        let state = FilterState::new().with_date_range(DateRange::LastMonth);
        assert_eq!(filter_posts(&posts, &state, now()).len(), 2);
    }

    #[test]
    fn test_range_boundary_and_undated() {
        let mut undated = dated("undated", 0);
        undated.date = None;
        let posts = vec![dated("exactly-week", 7), dated("future", -2), undated];

        let state = FilterState::new().with_date_range(DateRange::LastWeek);
        assert_eq!(
            slugs(&filter_posts(&posts, &state, now())),
            vec!["exactly-week", "future"]
        );

        let state = FilterState::new().with_date_range(DateRange::All);
        assert_eq!(filter_posts(&posts, &state, now()).len(), 3);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let mut posts = sample();
        posts.push(dated("recent-tech", 2));
        posts[3].tags = vec!["ts".to_string()];

        let states = [
            FilterState::new().with_query("ts").with_category("Tech"),
            FilterState::new().with_tag("ts").with_date_range(DateRange::LastWeek),
            FilterState::new()
                .with_query("grid")
                .with_category("Life")
                .with_tag("css"),
            FilterState::new()
                .with_query("g")
                .with_category("Tech")
                .with_tag("ts")
                .with_date_range(DateRange::LastYear),
        ];

        for state in &states {
            let visible = filter_posts(&posts, state, now());
            for p in &posts {
                let individually = FilterState::new().with_query(state.query.clone()).matches(p, now())
                    && state
                        .category
                        .as_ref()
                        .map_or(true, |c| FilterState::new().with_category(c.clone()).matches(p, now()))
                    && state
                        .tag
                        .as_ref()
                        .map_or(true, |t| FilterState::new().with_tag(t.clone()).matches(p, now()))
                    && state
                        .date_range
                        .map_or(true, |r| FilterState::new().with_date_range(r).matches(p, now()));
                assert_eq!(visible.iter().any(|v| v.slug == p.slug), individually);
            }
        }
    }

    #[test]
    fn test_clear_and_deserialize() {
        let mut state: FilterState =
            serde_json::from_str(r#"{"query": "rust", "date_range": "last-3-months"}"#).unwrap();
        assert_eq!(state.date_range, Some(DateRange::LastThreeMonths));
        assert!(state.is_active());

        state.clear();
        assert_eq!(state, FilterState::default());
    }
}
