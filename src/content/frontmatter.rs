//! Front-matter parsing

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// Errors raised while parsing a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("failed to parse YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unterminated JSON front-matter")]
    UnterminatedJson,
}

/// Render a scalar YAML/JSON value as a string; anything else has no string form
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// A string field that never fails: non-scalars and null become empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).filter(|s| !s.trim().is_empty()))
}

/// Accepts a single string or a list of scalars
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let tags: Vec<String> = match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(&other).into_iter().collect(),
    };
    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    })
}

/// Front-matter data from a blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub excerpt: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
}

/// Raw front-matter block located at the top of a file
enum Block<'a> {
    Yaml(&'a str),
    Json(&'a str),
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let (block, body) = split(content)?;
        let fm = match block {
            Some(block) => Self::from_block(block)?,
            None => FrontMatter::default(),
        };
        Ok((fm, body))
    }

    /// Like [`FrontMatter::parse`], but a malformed block yields default
    /// metadata instead of an error.
    pub fn parse_lenient(content: &str) -> (Self, &str) {
        match split(content) {
            Ok((None, body)) => (FrontMatter::default(), body),
            Ok((Some(block), body)) => match Self::from_block(block) {
                Ok(fm) => (fm, body),
                Err(e) => {
                    tracing::warn!("{}, using defaults", e);
                    (FrontMatter::default(), body)
                }
            },
            Err(e) => {
                tracing::warn!("{}, treating as content", e);
                (FrontMatter::default(), content.trim_start())
            }
        }
    }

    fn from_block(block: Block<'_>) -> Result<Self, FrontMatterError> {
        match block {
            Block::Yaml(yaml) => Ok(serde_yaml::from_str(yaml)?),
            Block::Json(json) => Ok(serde_json::from_str(json)?),
        }
    }

    /// Parse the date string, interpreting offset-less values in `tz`
    /// (system local time when `None`)
    pub fn parse_date(&self, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(|s| parse_date_string(s, tz))
    }
}

/// Locate the front-matter block and the body that follows it
fn split(content: &str) -> Result<(Option<Block<'_>>, &str), FrontMatterError> {
    let content = content.trim_start();

    if content.starts_with("---") {
        return Ok(split_yaml(content));
    }

    if content.starts_with(";;;") || content.starts_with('{') {
        return split_json(content).map(|(json, body)| (Some(Block::Json(json)), body));
    }

    Ok((None, content))
}

fn split_yaml(content: &str) -> (Option<Block<'_>>, &str) {
    let rest = &content[3..];
    let rest = rest.trim_start_matches(['\n', '\r']);

    let Some(end_pos) = rest.find("\n---") else {
        return (None, content);
    };

    let yaml = &rest[..end_pos];
    let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

    if yaml.trim().is_empty() {
        return (None, remaining);
    }

    // `---` is also a Markdown rule; only a block with `key: value` lines is metadata
    if !has_yaml_structure(yaml) {
        return (None, content);
    }

    (Some(Block::Yaml(yaml)), remaining)
}

fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after = &trimmed[colon_pos + 1..];
        after.is_empty() || after.starts_with(' ')
    })
}

fn split_json(content: &str) -> Result<(&str, &str), FrontMatterError> {
    // ;;; { ... } ;;;
    if let Some(rest) = content.strip_prefix(";;;") {
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::UnterminatedJson)?;
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
        return Ok((&rest[..end_pos], remaining));
    }

    // Bare JSON object: find the matching closing brace
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let remaining = content[i + 1..].trim_start_matches(['\n', '\r']);
                    return Ok((&content[..=i], remaining));
                }
            }
            _ => {}
        }
    }

    Err(FrontMatterError::UnterminatedJson)
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(dt, tz);
        }
    }

    // A bare YAML date is a timestamp at UTC midnight
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?).fixed_offset());
    }

    for fmt in ["%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

fn localize(naive: NaiveDateTime, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    match tz {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.fixed_offset()),
        None => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.fixed_offset()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
excerpt: A first post
category: Tech
tags:
  - rust
  - blog
author: Jane
featured: true
image: /images/hello.png
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.category, "Tech");
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.author, "Jane");
        assert!(fm.featured);
        assert_eq!(fm.image, "/images/hello.png");
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_missing_fields_default() {
        let content = "---\ntitle: Only Title\n---\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Only Title");
        assert_eq!(fm.excerpt, "");
        assert_eq!(fm.category, "");
        assert!(fm.tags.is_empty());
        assert!(!fm.featured);
        assert!(fm.date.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_malformed_fields_default() {
        let content = r#"---
title: [not, a, string]
featured: maybe
tags:
  nested: map
category: 42
---
Body
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert!(!fm.featured);
        assert!(fm.tags.is_empty());
        assert_eq!(fm.category, "42");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single\ntags: Notes\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test {Post}", "tags": ["a", "b"], "featured": true}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Test {Post}");
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(fm.featured);
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_parse_semicolon_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Fenced");
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_broken_yaml_is_lenient() {
        let content = "---\ntitle: \"unclosed\ncategory: Tech\n---\nStill here";
        assert!(FrontMatter::parse(content).is_err());

        let (fm, body) = FrontMatter::parse_lenient(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Still here");
    }

    #[test]
    fn test_unterminated_json_is_lenient() {
        let content = "{ \"title\": \"oops\"\nno closing brace";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::UnterminatedJson)
        ));
        let (fm, body) = FrontMatter::parse_lenient(content);
        assert_eq!(fm.title, "");
        assert!(body.contains("no closing brace"));
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "\n---\n\nCheck out https://example.com/path\n\n---\nMore content.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_parse_date_formats() {
        let tz = Some(chrono_tz::UTC);

        let dt = parse_date_string("2024-01-15", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        let dt = parse_date_string("2024-01-15 10:30:00", tz).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");

        let dt = parse_date_string("2024-01-15T10:30:00+08:00", tz).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);

        let dt = parse_date_string("January 15, 2024", tz).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");

        assert!(parse_date_string("not a date", tz).is_none());
    }

    #[test]
    fn test_parse_date_uses_timezone() {
        let fm = FrontMatter {
            date: Some("2024-06-01 12:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date(Some(chrono_tz::Asia::Taipei)).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 12:00");
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        let fm = FrontMatter {
            date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date(Some(chrono_tz::Asia::Taipei)).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        let dt = parse_date_string("2024/01/15", Some(chrono_tz::Asia::Taipei)).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
    }
}
