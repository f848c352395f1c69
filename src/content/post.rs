//! Post models

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter;

/// Metadata-only view of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    /// File name with the extension stripped; the routing key
    pub id: String,

    /// Front-matter fields, verbatim and in declaration order
    pub metadata: IndexMap<String, serde_yaml::Value>,
}

impl PostSummary {
    /// The `date` metadata field, when it is a string scalar
    pub fn date(&self) -> Option<&str> {
        self.str_field("date")
    }

    /// The `title` metadata field, when it is a string scalar
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    /// The `date` field parsed as a calendar date, used as the sort key
    pub(crate) fn date_time(&self) -> Option<DateTime<Local>> {
        self.date().and_then(frontmatter::parse_date_string)
    }
}

/// Full post data, including the rendered HTML body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    /// File name with the extension stripped; the routing key
    pub id: String,

    /// Rendered HTML body
    pub content_html: String,

    /// Front-matter fields, verbatim and in declaration order
    pub metadata: IndexMap<String, serde_yaml::Value>,
}

impl PostDocument {
    /// Project down to the metadata-only view
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
