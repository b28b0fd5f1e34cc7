//! Post models
//!
//! [`Post`] is the full record the loader resolves from one markdown file.
//! The components only ever see its two read models, [`PostSummary`] for
//! listings and [`PostDetail`] for a single post page.

use serde::{Deserialize, Serialize};

/// Markup the content resolver vouches for.
///
/// Rendered verbatim by the post template: no escaping, no sanitizing. Only
/// construct it from output the resolver produced itself (rendered
/// markdown) or from markup that was sanitized upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One post as listed on the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Source path relative to the content directory
    pub id: String,
    /// Route of the post page
    pub path: String,
    pub title: String,
    pub author: String,
    /// Display date, as written in front-matter
    pub date: String,
}

/// One post as shown on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub path: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub body_html: TrustedHtml,
}

/// A resolved blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier (source path relative to the content dir)
    pub id: String,

    /// Route of the post page, e.g. `/first-post`
    pub path: String,

    /// Post title
    pub title: String,

    /// Post author
    pub author: String,

    /// Display date string
    pub date: String,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub html: TrustedHtml,

    /// Plain-text excerpt
    pub excerpt: String,

    /// Whether the post is published
    pub published: bool,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: impl Into<String>, path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: title.into(),
            author: String::new(),
            date: String::new(),
            raw: String::new(),
            html: TrustedHtml::default(),
            excerpt: String::new(),
            published: true,
        }
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            path: self.path.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            date: self.date.clone(),
        }
    }

    pub fn detail(&self) -> PostDetail {
        PostDetail {
            path: self.path.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            date: self.date.clone(),
            body_html: self.html.clone(),
        }
    }
}
