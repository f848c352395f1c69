//! postroll: Markdown post loading for static blogs
//!
//! Point a [`PostStore`] at a directory of Markdown files with front-matter
//! headers and it hands back date-sorted summaries, routing identifiers, and
//! fully rendered documents. The host framework owns routing and page
//! rendering; this crate only turns files into data.
//!
//! ```no_run
//! # async fn demo() -> postroll::Result<()> {
//! let store = postroll::PostStore::new("posts");
//!
//! for summary in store.list_summaries()? {
//!     println!("{}: {:?}", summary.id, summary.title());
//! }
//!
//! let doc = store.load_document("hello-world").await?;
//! assert!(!doc.content_html.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod error;

pub use config::{HighlightConfig, StoreConfig};
pub use content::{ContentLoader, PostDocument, PostSummary};
pub use error::{Error, FrontMatterError, Result};

use content::MarkdownRenderer;
use std::path::Path;

/// A read-only store of Markdown posts in one directory.
///
/// The store owns the configuration and the Markdown renderer (syntax and
/// theme sets load once, at construction). Every operation re-reads the file
/// system, so results always match the directory's current contents.
pub struct PostStore {
    config: StoreConfig,
    renderer: MarkdownRenderer,
}

impl PostStore {
    /// Create a store over the given posts directory with default settings
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self::with_config(StoreConfig::new(posts_dir))
    }

    /// Create a store from a full configuration
    pub fn with_config(config: StoreConfig) -> Self {
        let renderer = MarkdownRenderer::new(config.highlight.clone());
        Self { config, renderer }
    }

    /// The store's configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// List all posts as metadata-only summaries, newest first
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>> {
        self.loader().list_summaries()
    }

    /// List all post identifiers in directory enumeration order
    pub fn list_ids(&self) -> Result<Vec<String>> {
        self.loader().list_ids()
    }

    /// Load one post in full, rendering its Markdown body to HTML
    pub async fn load_document(&self, id: &str) -> Result<PostDocument> {
        self.loader().load_document(id).await
    }

    fn loader(&self) -> ContentLoader<'_> {
        ContentLoader::new(&self.config, &self.renderer)
    }
}
