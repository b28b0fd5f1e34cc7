//! Content module - resolves markdown posts into the records pages render

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod store;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostDetail, PostSummary, TrustedHtml};
pub use store::{ContentResolver, PostStore};

/// Errors raised while resolving content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter: {0}")]
    FrontMatter(String),

    #[error("No post found at path: {0}")]
    PostNotFound(String),
}
