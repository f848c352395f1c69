//! Content module - front-matter, Markdown rendering, and post loading

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{PostDocument, PostSummary};
