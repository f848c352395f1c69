//! Content loader - lists and loads posts from the configured directory
//!
//! Every call re-reads the file system; nothing is cached between calls, so
//! the results always reflect the directory as it is right now.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, PostDocument, PostSummary};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Loads post summaries and documents for a [`crate::PostStore`]
pub struct ContentLoader<'a> {
    config: &'a StoreConfig,
    renderer: &'a MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    pub fn new(config: &'a StoreConfig, renderer: &'a MarkdownRenderer) -> Self {
        Self { config, renderer }
    }

    /// List all posts as metadata-only summaries, newest first.
    ///
    /// Posts are ordered by their `date` front-matter field parsed as a
    /// calendar date, descending. Posts without a parseable date sort after
    /// all dated ones; ties break by ascending id so the order is stable.
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>> {
        let mut summaries = Vec::new();
        for path in self.post_files()? {
            summaries.push(self.load_summary(&path)?);
        }

        summaries.sort_by(|a, b| {
            match (a.date_time(), b.date_time()) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| a.id.cmp(&b.id))
        });

        tracing::debug!("listed {} post summaries", summaries.len());
        Ok(summaries)
    }

    /// List the identifiers of all posts, in directory enumeration order
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let ids = self
            .post_files()?
            .iter()
            .filter_map(|p| post_id(p))
            .collect();
        Ok(ids)
    }

    /// Load one post in full, rendering its Markdown body to HTML
    pub async fn load_document(&self, id: &str) -> Result<PostDocument> {
        if !is_valid_id(id) {
            return Err(Error::not_found(id));
        }

        let (path, content) = self.read_post_file(id).await?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| Error::FrontMatter {
            path: path.clone(),
            source: e,
        })?;
        let content_html = self.renderer.render(body)?;

        tracing::debug!("loaded post {:?} from {:?}", id, path);
        Ok(PostDocument {
            id: id.to_string(),
            content_html,
            metadata: fm.fields,
        })
    }

    /// Try `<posts_dir>/<id>.<ext>` for each recognized extension
    async fn read_post_file(&self, id: &str) -> Result<(PathBuf, String)> {
        for ext in &self.config.extensions {
            let path = self.config.posts_dir.join(format!("{id}.{ext}"));
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => return Ok((path, content)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(Error::io(path, e)),
            }
        }
        Err(Error::not_found(id))
    }

    /// Parse one file into a summary without rendering its body
    fn load_summary(&self, path: &Path) -> Result<PostSummary> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let (fm, _body) = FrontMatter::parse(&content).map_err(|e| Error::FrontMatter {
            path: path.to_path_buf(),
            source: e,
        })?;

        let id = post_id(path).unwrap_or_default();
        Ok(PostSummary {
            id,
            metadata: fm.fields,
        })
    }

    /// Enumerate post files in the configured directory.
    ///
    /// The walk is flat (posts live directly in the directory) and errors,
    /// including a missing or unreadable directory, surface to the caller.
    fn post_files(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.posts_dir;
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("file system loop"));
                Error::io(dir.clone(), source)
            })?;
            let path = entry.path();
            if path.is_file() && self.config.is_post_file(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

/// Derive a post id from its file path: the file name minus the extension
fn post_id(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Identifiers come from file names, so they never contain path structure
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}
