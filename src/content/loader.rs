//! Content loader - loads posts from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post, TrustedHtml};
use crate::config::SiteConfig;
use crate::Blog;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self::with_dir(&blog.config, &blog.content_dir)
    }

    /// Create a loader for an explicit content directory
    pub fn with_dir(config: &'a SiteConfig, content_dir: &Path) -> Self {
        Self {
            config,
            content_dir: content_dir.to_path_buf(),
            renderer: MarkdownRenderer::with_options(&config.highlight),
        }
    }

    /// Load all posts, sorted by id
    ///
    /// Files that fail to load are logged and skipped. Unpublished posts are
    /// dropped unless `render_drafts` is set.
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) if post.published || self.config.render_drafts => posts.push(post),
                Ok(post) => tracing::debug!("Skipping unpublished post {}", post.id),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        posts.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.content_dir);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let id = path
            .strip_prefix(&self.content_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        let title = fm.title.unwrap_or_else(|| stem.to_string());
        let route = fm
            .path
            .unwrap_or_else(|| format!("/{}", slug::slugify(stem)));

        let mut post = Post::new(id, route, title);
        post.author = fm.author.unwrap_or_default();
        post.date = fm.date.unwrap_or_default();
        post.raw = body.to_string();
        post.html = TrustedHtml::new(self.renderer.render(body));
        post.excerpt = MarkdownRenderer::excerpt(body, self.config.excerpt_length);
        post.published = fm.published;

        Ok(post)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
