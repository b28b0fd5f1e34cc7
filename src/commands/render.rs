//! Render a single page to a string

use anyhow::Result;

use crate::content::ContentResolver;
use crate::pages;
use crate::Blog;

/// Render the post index, or the post at `path`
///
/// A path that matches no post is an error.
pub fn run(blog: &Blog, path: Option<&str>) -> Result<String> {
    let store = blog.load_store()?;

    match path {
        None => Ok(pages::index_page(&blog.config, &store)),
        Some(path) => {
            let post = store.require_post_detail(path)?;
            Ok(pages::detail_page(&blog.config, &post))
        }
    }
}
