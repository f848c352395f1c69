//! Store configuration
//!
//! The posts directory is explicit state handed to [`crate::PostStore`] at
//! construction time; there is no process-wide default location.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Configuration for a post store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory containing the post files
    pub posts_dir: PathBuf,

    /// File extensions recognized as posts
    pub extensions: Vec<String>,

    /// Code highlighting settings
    pub highlight: HighlightConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            highlight: HighlightConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Create a config for the given posts directory with default settings
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: StoreConfig = serde_yaml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(config)
    }

    /// Check whether a path carries one of the recognized extensions
    pub(crate) fn is_post_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|known| known == e))
            .unwrap_or(false)
    }
}

/// Syntax highlighting configuration for fenced code blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight fenced code blocks at all
    pub enable: bool,
    /// syntect theme name
    pub theme: String,
    /// Emit a line-number gutter next to highlighted code
    pub line_numbers: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
posts_dir: content/blog
extensions:
  - md
highlight:
  theme: InspiredGitHub
  line_numbers: true
"#;
        let config: StoreConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("content/blog"));
        assert_eq!(config.extensions, vec!["md"]);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.highlight.line_numbers);
    }

    #[test]
    fn test_is_post_file() {
        let config = StoreConfig::default();
        assert!(config.is_post_file(Path::new("a.md")));
        assert!(config.is_post_file(Path::new("b.markdown")));
        assert!(!config.is_post_file(Path::new("notes.txt")));
        assert!(!config.is_post_file(Path::new("README")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.yml");
        fs::write(&path, "posts_dir: my-posts\n").unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("my-posts"));
        // unspecified fields keep their defaults
        assert_eq!(config.extensions, vec!["md", "markdown"]);
    }
}
