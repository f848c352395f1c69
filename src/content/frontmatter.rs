//! Front-matter extraction
//!
//! Posts carry their metadata in a fenced block at the top of the file.
//! Two fence styles are recognized: a YAML mapping between `---` lines and a
//! JSON object between `;;;` lines. The block is kept as an open mapping so
//! every field an author declares survives verbatim; no schema is imposed.

use chrono::{DateTime, Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FrontMatterError;

/// Metadata block parsed from the head of a post file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    /// Fields exactly as declared, in declaration order
    pub fields: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a file's content into front-matter and body.
    ///
    /// A file without a recognizable fence yields empty metadata and the
    /// whole content as body. A lone `---` line with no closing fence is
    /// treated as a Markdown thematic break, not as front-matter. A fence
    /// whose payload does not deserialize is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start_matches(['\u{feff}']);

        if let Some(rest) = strip_fence_line(trimmed, "---") {
            if let Some((block, body)) = split_at_fence(rest, "---") {
                let fm = Self::from_yaml(block)?;
                return Ok((fm, body));
            }
            // No closing fence: thematic break, not metadata.
            return Ok((Self::default(), content));
        }

        if let Some(rest) = strip_fence_line(trimmed, ";;;") {
            if let Some((block, body)) = split_at_fence(rest, ";;;") {
                let fm = Self::from_json(block)?;
                return Ok((fm, body));
            }
            return Ok((Self::default(), content));
        }

        Ok((Self::default(), content))
    }

    fn from_yaml(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        let fields: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(block)?;
        Ok(Self { fields })
    }

    fn from_json(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        let fields: IndexMap<String, serde_yaml::Value> = serde_json::from_str(block)?;
        Ok(Self { fields })
    }

    /// The `date` field, when present as a string scalar
    pub fn date(&self) -> Option<&str> {
        self.str_field("date")
    }

    /// The `title` field, when present as a string scalar
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// If `content` opens with a line consisting of `fence`, return what follows it
fn strip_fence_line<'a>(content: &'a str, fence: &str) -> Option<&'a str> {
    let rest = content.strip_prefix(fence)?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
}

/// Find the closing fence line and split into (block, body)
fn split_at_fence<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut search_from = 0;
    // The fence must sit alone on its own line.
    if content.starts_with(fence) && line_is_fence(content, 0, fence) {
        let body = skip_fence_line(&content[fence.len()..]);
        return Some(("", body));
    }
    while let Some(pos) = content[search_from..].find('\n') {
        let line_start = search_from + pos + 1;
        if content[line_start..].starts_with(fence) && line_is_fence(content, line_start, fence) {
            let block = &content[..line_start];
            let body = skip_fence_line(&content[line_start + fence.len()..]);
            return Some((block, body));
        }
        search_from = line_start;
    }
    None
}

/// True when the text after the fence marker is only a line ending or EOF
fn line_is_fence(content: &str, line_start: usize, fence: &str) -> bool {
    let after = &content[line_start + fence.len()..];
    after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n")
}

fn skip_fence_line(rest: &str) -> &str {
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest
}

/// Parse a front-matter date string in the formats blogs commonly use
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return local_from_naive(d.and_hms_opt(0, 0, 0)?);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

fn local_from_naive(dt: NaiveDateTime) -> Option<DateTime<Local>> {
    dt.and_local_timezone(Local).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = "---\ntitle: Hello World\ndate: '2024-01-15'\ndraft: false\n---\n\nBody text.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.date(), Some("2024-01-15"));
        assert_eq!(fm.fields.get("draft"), Some(&serde_yaml::Value::Bool(false)));
        assert_eq!(body.trim(), "Body text.");
    }

    #[test]
    fn test_field_order_preserved() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<&str> = fm.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test Post\", \"date\": \"2023-05-01\"}\n;;;\nContent here.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Test Post"));
        assert_eq!(fm.date(), Some("2023-05-01"));
        assert!(body.contains("Content here."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a plain post body.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.fields.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_fence_is_thematic_break() {
        let content = "---\n\nSection one\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.fields.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_empty_block() {
        let content = "---\n---\nbody\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.fields.is_empty());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_parse_date_string_formats() {
        for s in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15 10:30",
            "2024-01-15T10:30:00",
        ] {
            let dt = parse_date_string(s).unwrap();
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15", "format {s}");
        }
        assert!(parse_date_string("next tuesday").is_none());
        assert!(parse_date_string("").is_none());
    }
}
